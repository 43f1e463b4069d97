use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

/// Logged-in user context, persisted between invocations.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Session {
    pub id: u64,
    pub token: String,
    pub username: String,
    pub name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub role: String,
    #[serde(default)]
    pub plan: Option<String>,
}

impl Session {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Get the directory where the session file lives
pub fn session_dir() -> Result<PathBuf> {
    let dir = dirs_next::cache_dir()
        .ok_or_else(|| eyre!("Unable to determine cache directory"))?
        .join("n360");

    fs::create_dir_all(&dir).map_err(|e| eyre!("Failed to create session directory: {}", e))?;

    Ok(dir)
}

/// Persist the session as JSON in the given directory
pub fn save_session(dir: &Path, session: &Session) -> Result<()> {
    let path = dir.join(SESSION_FILE);
    let json = serde_json::to_string_pretty(session)
        .map_err(|e| eyre!("Failed to serialize session: {}", e))?;

    fs::write(&path, json).map_err(|e| eyre!("Failed to write session file: {}", e))?;

    Ok(())
}

/// Load the session from the given directory, if one exists
pub fn load_session(dir: &Path) -> Result<Option<Session>> {
    let path = dir.join(SESSION_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let raw =
        fs::read_to_string(&path).map_err(|e| eyre!("Failed to read session file: {}", e))?;

    // A corrupt session file should not brick the CLI; treat it as logged out.
    Ok(serde_json::from_str(&raw).ok())
}

/// Remove the session file, if one exists
pub fn clear_session(dir: &Path) -> Result<()> {
    let path = dir.join(SESSION_FILE);
    if path.exists() {
        fs::remove_file(&path).map_err(|e| eyre!("Failed to remove session file: {}", e))?;
    }
    Ok(())
}

/// Load the session or fail with an actionable error
pub fn require_session() -> Result<Session> {
    let dir = session_dir()?;
    load_session(&dir)?
        .ok_or_else(|| eyre!(Error::NotLoggedIn("run `n360 auth login` first".to_string())))
}

/// Create an HTTP client, attaching the session's Bearer token when given
pub fn create_portal_client(session: Option<&Session>) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(session) = session {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", session.token))
                .map_err(|e| eyre!("Invalid header value: {}", e))?,
        );
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            id: 42,
            token: "tok_abc".to_string(),
            username: "aperez".to_string(),
            name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            role: "user".to_string(),
            plan: Some("Premium Mensual".to_string()),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        save_session(dir.path(), &session()).unwrap();
        let loaded = load_session(dir.path()).unwrap().unwrap();

        assert_eq!(loaded.id, 42);
        assert_eq!(loaded.token, "tok_abc");
        assert_eq!(loaded.display_name(), "Ana Pérez");
        assert_eq!(loaded.plan.as_deref(), Some("Premium Mensual"));
    }

    #[test]
    fn test_load_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_session(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_session_file_is_treated_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        assert!(load_session(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_clear_session_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        save_session(dir.path(), &session()).unwrap();

        clear_session(dir.path()).unwrap();
        assert!(load_session(dir.path()).unwrap().is_none());

        // Clearing twice is fine.
        clear_session(dir.path()).unwrap();
    }

    #[test]
    fn test_is_admin_uses_exact_backend_role() {
        let mut s = session();
        assert!(!s.is_admin());
        s.role = "admin".to_string();
        assert!(s.is_admin());
        s.role = "Admin".to_string();
        assert!(!s.is_admin());
    }
}
