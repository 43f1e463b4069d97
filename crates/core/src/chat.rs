//! Assistant chat wire models and reply cleanup.

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatResponse {
    pub reply: String,
}

/// Clean a raw model reply for display.
///
/// The backend model sometimes leaks its reasoning inside a
/// `<think>...</think>` block; the first such block is removed
/// (case-insensitive, spanning newlines) and the result trimmed.
pub fn clean_reply(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let think_re = Regex::new(r"(?is)<think>.*?</think>").unwrap();
    think_re.replace(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_reply_empty() {
        assert_eq!(clean_reply(""), "");
    }

    #[test]
    fn test_clean_reply_passthrough() {
        assert_eq!(clean_reply("  hola  "), "hola");
    }

    #[test]
    fn test_clean_reply_strips_think_block() {
        let raw = "<think>razonamiento\ninterno</think>\nRespuesta final";
        assert_eq!(clean_reply(raw), "Respuesta final");
    }

    #[test]
    fn test_clean_reply_case_insensitive() {
        assert_eq!(clean_reply("<THINK>x</THINK> hola"), "hola");
    }

    #[test]
    fn test_clean_reply_only_first_block() {
        let raw = "<think>a</think>uno<think>b</think>dos";
        assert_eq!(clean_reply(raw), "uno<think>b</think>dos");
    }
}
