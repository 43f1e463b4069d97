//! Plain-text article bodies to HTML fragments.
//!
//! Scraped articles arrive as newline-delimited plain text: a few short
//! byline/source lines at the top, then a mix of section titles, bullet
//! lists, schedule notes and prose. `format_content` turns that into a
//! small HTML fragment for the detail view; `extract_tags` pulls the
//! leading lines out as card chips.

use regex::Regex;

/// A single classified line of article content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    ListItem(String),
    Note(String),
    Paragraph(String),
}

/// Maximum number of leading lines consumed as the metadata prefix.
const MAX_METADATA_LINES: usize = 3;

/// Lines this short, with no sentence punctuation, are treated as
/// byline/source metadata rather than body content.
const METADATA_MAX_CHARS: usize = 30;

const HEADING_MAX_CHARS: usize = 50;

fn is_metadata_line(line: &str) -> bool {
    let len = line.chars().count();
    len > 0
        && len <= METADATA_MAX_CHARS
        && !line.ends_with('.')
        && !line.contains(':')
        && !line.contains('—')
        && !line.contains("http")
}

fn is_uppercase_latin(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Ü' | 'Ñ')
}

fn is_heading_line(line: &str) -> bool {
    let first = match line.chars().next() {
        Some(c) => c,
        None => return false,
    };
    line.chars().count() <= HEADING_MAX_CHARS && is_uppercase_latin(first) && !line.ends_with('.')
}

fn is_list_line(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("• ")
}

fn is_note_line(line: &str) -> bool {
    line.contains('|') || line.starts_with('🕒')
}

fn list_item(line: &str) -> Block {
    let item = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
        .unwrap_or(line);
    Block::ListItem(item.to_string())
}

/// Ordered (predicate, constructor) dispatch table. The order is
/// load-bearing: a line matching several predicates takes the earliest
/// classification (a "Horario | Lima" line is a heading, not a note).
const CLASSIFIERS: [(fn(&str) -> bool, fn(&str) -> Block); 3] = [
    (is_heading_line, |l| Block::Heading(l.to_string())),
    (is_list_line, list_item),
    (is_note_line, |l| Block::Note(l.to_string())),
];

/// Classify one trimmed, non-empty line into a block.
pub fn classify_line(line: &str) -> Block {
    for (matches, build) in CLASSIFIERS {
        if matches(line) {
            return build(line);
        }
    }
    Block::Paragraph(line.to_string())
}

fn escaped(text: &str) -> String {
    html_escape::encode_text(text).to_string()
}

/// Format a raw plain-text article body as an HTML fragment.
///
/// Lines are split on `\n`, trimmed, and empty lines dropped. Up to
/// three leading short label-like lines become a single metadata block
/// joined with `" • "`. Every remaining line is classified via
/// [`classify_line`], and each maximal run of consecutive list items is
/// wrapped in one `<ul>`. Empty input yields an empty string.
pub fn format_content(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return String::new();
    }

    let meta_len = lines
        .iter()
        .take(MAX_METADATA_LINES)
        .take_while(|l| is_metadata_line(l))
        .count();

    let mut html = String::new();
    if meta_len > 0 {
        let joined = lines[..meta_len].join(" • ");
        html.push_str(&format!("<p class=\"meta\">{}</p>", escaped(&joined)));
    }

    let mut in_list = false;
    for line in &lines[meta_len..] {
        let block = classify_line(line);

        if matches!(block, Block::ListItem(_)) {
            if !in_list {
                html.push_str("<ul>");
                in_list = true;
            }
        } else if in_list {
            html.push_str("</ul>");
            in_list = false;
        }

        match block {
            Block::Heading(text) => html.push_str(&format!("<h3>{}</h3>", escaped(&text))),
            Block::ListItem(text) => html.push_str(&format!("<li>{}</li>", escaped(&text))),
            Block::Note(text) => {
                html.push_str(&format!("<p class=\"note\">{}</p>", escaped(&text)))
            }
            Block::Paragraph(text) => html.push_str(&format!("<p>{}</p>", escaped(&text))),
        }
    }

    if in_list {
        html.push_str("</ul>");
    }

    html
}

/// First up-to-3 non-empty trimmed lines of the content, verbatim.
///
/// Used for the small chips on article cards; returns an empty vec when
/// there is nothing usable.
pub fn extract_tags(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(3)
        .map(str::to_string)
        .collect()
}

/// Lead sentence for the detail header: the first line of the text, or
/// the first sentence when the text starts with a line break.
pub fn extract_lead(text: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or("").trim();
    if !first_line.is_empty() {
        return first_line.to_string();
    }

    let sentence_re = Regex::new(r"[.!?]\s").unwrap();
    let lead = sentence_re.split(text).next().unwrap_or("").trim();
    lead.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_content_empty() {
        assert_eq!(format_content(""), "");
    }

    #[test]
    fn test_format_content_whitespace_only() {
        assert_eq!(format_content("   \n\n  \t \n"), "");
    }

    #[test]
    fn test_format_content_plain_paragraphs() {
        // Lines that fail every other predicate fall back to paragraphs.
        let raw = "esto es un párrafo largo que habla de cosas y termina aquí.\notro párrafo más.";
        assert_eq!(
            format_content(raw),
            "<p>esto es un párrafo largo que habla de cosas y termina aquí.</p><p>otro párrafo más.</p>"
        );
    }

    #[test]
    fn test_metadata_block_three_lines() {
        let raw = "Juan Pérez\nLima\n12 de mayo";
        assert_eq!(
            format_content(raw),
            "<p class=\"meta\">Juan Pérez • Lima • 12 de mayo</p>"
        );
    }

    #[test]
    fn test_metadata_stops_at_fourth_line() {
        // A fourth eligible line is body, not metadata.
        let raw = "Juan Pérez\nLima\n12 de mayo\nDeportes";
        let html = format_content(raw);
        assert!(html.starts_with("<p class=\"meta\">Juan Pérez • Lima • 12 de mayo</p>"));
        // "Deportes" passes the heading rules.
        assert!(html.ends_with("<h3>Deportes</h3>"));
    }

    #[test]
    fn test_metadata_rejects_punctuation_and_urls() {
        for line in [
            "Termina en punto.",
            "Hora: 14:00",
            "Lima — Perú",
            "ver http el enlace",
        ] {
            assert!(!is_metadata_line(line), "{line:?} should not be metadata");
        }
    }

    #[test]
    fn test_metadata_rejects_long_lines() {
        let long = "a".repeat(31);
        assert!(!is_metadata_line(&long));
        assert!(is_metadata_line(&"a".repeat(30)));
    }

    #[test]
    fn test_metadata_runs_before_heading_classification() {
        // "Título" also passes the heading rules, but the metadata scan
        // runs first and it is short enough to qualify, so it (and the
        // two list-marker lines, which also qualify) land in the
        // metadata block. Only the final sentence survives as body.
        let raw = "Título\n- uno\n- dos\nTexto normal.";
        assert_eq!(
            format_content(raw),
            "<p class=\"meta\">Título • - uno • - dos</p><p>Texto normal.</p>"
        );
    }

    #[test]
    fn test_heading_then_list_then_paragraph() {
        // First line is too long for metadata (31..=50 chars) but still
        // a valid heading, so the body keeps its structure.
        let heading = "Resumen general de la jornada electoral";
        assert!(heading.chars().count() > 30 && heading.chars().count() <= 50);

        let raw = format!("{heading}\n- uno\n- dos\nTexto normal.");
        assert_eq!(
            format_content(&raw),
            format!("<h3>{heading}</h3><ul><li>uno</li><li>dos</li></ul><p>Texto normal.</p>")
        );
    }

    #[test]
    fn test_two_list_runs_produce_two_lists() {
        let heading = "Lo más importante de la semana en Lima";
        let raw = format!("{heading}\n- uno\n- dos\npárrafo intermedio de texto.\n- tres");
        assert_eq!(
            format_content(&raw),
            format!(
                "<h3>{heading}</h3><ul><li>uno</li><li>dos</li></ul><p>párrafo intermedio de texto.</p><ul><li>tres</li></ul>"
            )
        );
    }

    #[test]
    fn test_bullet_glyph_list_items() {
        let raw = "la primera línea es un párrafo porque empieza en minúscula.\n• uno\n• dos";
        let html = format_content(raw);
        assert!(html.ends_with("<ul><li>uno</li><li>dos</li></ul>"));
    }

    #[test]
    fn test_note_lines() {
        let raw = "el contexto va primero para evitar el prefijo de metadatos.\n🕒 14:00 hora local\nlima | deportes | mundo";
        let html = format_content(raw);
        assert!(html.contains("<p class=\"note\">🕒 14:00 hora local</p>"));
        assert!(html.contains("<p class=\"note\">lima | deportes | mundo</p>"));
    }

    #[test]
    fn test_heading_beats_note_on_pipe() {
        // Classification order: heading first, even with a '|' present.
        assert_eq!(
            classify_line("Horario | Lima"),
            Block::Heading("Horario | Lima".to_string())
        );
    }

    #[test]
    fn test_heading_accepts_spanish_uppercase() {
        for line in ["Ámbito local", "Última hora", "Ñandú avistado"] {
            assert!(matches!(classify_line(line), Block::Heading(_)), "{line}");
        }
    }

    #[test]
    fn test_heading_rejects_lowercase_and_trailing_dot() {
        assert!(matches!(
            classify_line("minúscula al inicio"),
            Block::Paragraph(_)
        ));
        assert!(matches!(
            classify_line("Frase que termina en punto."),
            Block::Paragraph(_)
        ));
    }

    #[test]
    fn test_heading_rejects_long_lines() {
        let long = format!("T{}", "a".repeat(50));
        assert!(long.chars().count() > 50);
        assert!(matches!(classify_line(&long), Block::Paragraph(_)));
    }

    #[test]
    fn test_output_is_html_escaped() {
        let raw = "el contenido lleva <script> y 1 < 2 & 3 en el cuerpo del texto.";
        let html = format_content(raw);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_extract_tags_empty() {
        assert!(extract_tags("").is_empty());
        assert!(extract_tags(" \n \n").is_empty());
    }

    #[test]
    fn test_extract_tags_takes_first_three() {
        let raw = "uno\n\n  dos  \ntres\ncuatro";
        assert_eq!(extract_tags(raw), vec!["uno", "dos", "tres"]);
    }

    #[test]
    fn test_extract_lead_first_line() {
        assert_eq!(extract_lead("primera línea\nsegunda"), "primera línea");
    }

    #[test]
    fn test_extract_lead_falls_back_to_first_sentence() {
        assert_eq!(
            extract_lead("\nUna oración. Otra más."),
            "Una oración"
        );
    }

    #[test]
    fn test_extract_lead_empty() {
        assert_eq!(extract_lead(""), "");
    }
}
