//! Article wire/domain models and listing transformations.
//!
//! The backend is a Spring service: articles come back with Spanish
//! field names and comma-separated tag/category strings, wrapped in a
//! standard Spring page envelope. This module adapts those rows into
//! the domain model used for rendering and builds the paginated list
//! output.

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Article row as returned by the backend.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DbArticle {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor", default)]
    pub author: Option<String>,
    #[serde(rename = "fechaPublicado", default)]
    pub published_at: String,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "contenido", default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(rename = "categorias", default)]
    pub categories: Option<String>,
    #[serde(rename = "actualizadoEn", default)]
    pub updated_at: Option<String>,
}

/// Spring page envelope.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpringPage<T> {
    pub content: Vec<T>,
    #[serde(rename = "totalElements")]
    pub total_elements: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    pub size: usize,
    /// Current page, 0-indexed.
    pub number: usize,
}

/// Article as used by the rendering layer.
#[derive(Debug, Serialize, Clone)]
pub struct Article {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub published_at: String,
    pub image_url: Option<String>,
    pub content: Option<String>,
    pub summary: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

/// Pagination metadata for list output.
#[derive(Debug, Serialize, Clone)]
pub struct ListPaginationInfo {
    /// 1-indexed for display.
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub size: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Complete list output with articles and pagination.
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub items: Vec<Article>,
    pub pagination: ListPaginationInfo,
}

/// Split a comma-separated backend field into trimmed, non-empty parts.
pub fn split_csv(s: Option<&str>) -> Vec<String> {
    match s {
        None => vec![],
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Strip HTML tags and collapse whitespace to get card-safe plain text.
pub fn strip_html(html: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").unwrap();
    let stripped = tag_re.replace_all(html, " ");
    let ws_re = Regex::new(r"\s+").unwrap();
    ws_re.replace_all(&stripped, " ").trim().to_string()
}

const SUMMARY_MAX_CHARS: usize = 180;

/// Cap plain text at 180 characters, ellipsized.
pub fn summarize(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }

    let mut summary: String = chars[..SUMMARY_MAX_CHARS - 3].iter().collect();
    summary.push('…');
    summary
}

/// Render a backend timestamp ("2025-09-11T00:05:53") for display,
/// falling back to the raw value when it does not parse.
pub fn format_published(iso: &str) -> String {
    match NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Adapt a backend row into the domain article.
pub fn to_article(db: DbArticle) -> Article {
    let summary_source = db.content.clone().unwrap_or_else(|| db.title.clone());
    let summary = summarize(&strip_html(&summary_source));

    Article {
        id: db.id,
        url: db.url,
        title: db.title,
        author: db.author,
        published_at: db.published_at,
        image_url: db.image_url,
        content: db.content,
        summary,
        tags: split_csv(db.tags.as_deref()),
        categories: split_csv(db.categories.as_deref()),
    }
}

/// Transform a backend page into list output with navigation hints.
///
/// The backend page number is 0-indexed; the output is 1-indexed.
pub fn transform_article_page(page: SpringPage<DbArticle>) -> ListOutput {
    let items: Vec<Article> = page.content.into_iter().map(to_article).collect();

    let current_page = page.number + 1;
    let total_pages = page.total_pages;

    let next_page = if current_page < total_pages {
        Some(format!("n360 news list --page {}", current_page + 1))
    } else {
        None
    };

    let prev_page = if current_page > 1 {
        Some(format!("n360 news list --page {}", current_page - 1))
    } else {
        None
    };

    ListOutput {
        items,
        pagination: ListPaginationInfo {
            current_page,
            total_pages,
            total_items: page.total_elements,
            size: page.size,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    }
}

/// Candidates for the "more news" rail: everything except the article
/// currently open. Shuffling and capping happen in the shell.
pub fn related_pool(items: Vec<Article>, current_id: u64) -> Vec<Article> {
    items.into_iter().filter(|a| a.id != current_id).collect()
}

/// Raw listing filters as collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub query: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub categories: Vec<String>,
}

/// The single query a filter set projects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    Search(String),
    DateRange(String, String),
    Categories(Vec<String>),
    Default,
}

impl ListFilter {
    /// Project the filter state onto one query.
    ///
    /// Precedence mirrors the portal UI: free-text search wins, then a
    /// complete date range, then selected categories, then the plain
    /// listing. Decoupled from the transport call so it can be tested
    /// without HTTP.
    pub fn project(&self) -> ListQuery {
        let q = self.query.as_deref().unwrap_or("").trim().to_string();
        if !q.is_empty() {
            return ListQuery::Search(q);
        }

        if let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) {
            if !from.is_empty() && !to.is_empty() {
                return ListQuery::DateRange(from.to_string(), to.to_string());
            }
        }

        if !self.categories.is_empty() {
            return ListQuery::Categories(self.categories.clone());
        }

        ListQuery::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_article(id: u64) -> DbArticle {
        DbArticle {
            id,
            url: format!("https://noticias.example/{id}"),
            title: format!("Noticia {id}"),
            author: Some("Redacción".to_string()),
            published_at: "2025-09-11T00:05:53".to_string(),
            image_url: None,
            content: Some("<p>Cuerpo de la noticia</p>".to_string()),
            tags: Some("tag1, tag2".to_string()),
            categories: Some("Tecnología, Mundo".to_string()),
            updated_at: None,
        }
    }

    fn page(ids: &[u64], number: usize, total_pages: usize, total: usize) -> SpringPage<DbArticle> {
        SpringPage {
            content: ids.iter().copied().map(db_article).collect(),
            total_elements: total,
            total_pages,
            size: 6,
            number,
        }
    }

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv(Some("a, b ,c")), vec!["a", "b", "c"]);
        assert_eq!(split_csv(Some(" , ,")), Vec::<String>::new());
        assert_eq!(split_csv(None), Vec::<String>::new());
    }

    #[test]
    fn test_strip_html_tags_and_whitespace() {
        assert_eq!(
            strip_html("<p>Hola  <b>mundo</b></p>\n<p>dos</p>"),
            "Hola mundo dos"
        );
        assert_eq!(strip_html("sin etiquetas"), "sin etiquetas");
    }

    #[test]
    fn test_summarize_short_text_unchanged() {
        assert_eq!(summarize("corto"), "corto");
    }

    #[test]
    fn test_summarize_caps_at_180_chars() {
        let long = "á".repeat(200);
        let summary = summarize(&long);
        assert_eq!(summary.chars().count(), 178);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn test_to_article_builds_summary_and_lists() {
        let article = to_article(db_article(7));
        assert_eq!(article.summary, "Cuerpo de la noticia");
        assert_eq!(article.tags, vec!["tag1", "tag2"]);
        assert_eq!(article.categories, vec!["Tecnología", "Mundo"]);
    }

    #[test]
    fn test_to_article_summary_falls_back_to_title() {
        let mut db = db_article(7);
        db.content = None;
        let article = to_article(db);
        assert_eq!(article.summary, "Noticia 7");
    }

    #[test]
    fn test_format_published() {
        assert_eq!(format_published("2025-09-11T00:05:53"), "11/09/2025 00:05");
        assert_eq!(format_published("no-es-fecha"), "no-es-fecha");
    }

    #[test]
    fn test_transform_article_page_first_page() {
        let output = transform_article_page(page(&[1, 2], 0, 4, 20));
        assert_eq!(output.items.len(), 2);
        assert_eq!(output.pagination.current_page, 1);
        assert_eq!(output.pagination.total_pages, 4);
        assert!(output.pagination.prev_page_command.is_none());
        assert_eq!(
            output.pagination.next_page_command.as_deref(),
            Some("n360 news list --page 2")
        );
    }

    #[test]
    fn test_transform_article_page_last_page() {
        let output = transform_article_page(page(&[19, 20], 3, 4, 20));
        assert_eq!(output.pagination.current_page, 4);
        assert!(output.pagination.next_page_command.is_none());
        assert_eq!(
            output.pagination.prev_page_command.as_deref(),
            Some("n360 news list --page 3")
        );
    }

    #[test]
    fn test_transform_article_page_empty() {
        let output = transform_article_page(page(&[], 0, 0, 0));
        assert!(output.items.is_empty());
        assert_eq!(output.pagination.total_pages, 0);
        assert!(output.pagination.next_page_command.is_none());
        assert!(output.pagination.prev_page_command.is_none());
    }

    #[test]
    fn test_related_pool_excludes_current() {
        let items: Vec<Article> = [1u64, 2, 3].map(db_article).map(to_article).to_vec();
        let pool = related_pool(items, 2);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|a| a.id != 2));
    }

    #[test]
    fn test_filter_projection_search_wins() {
        let filter = ListFilter {
            query: Some("  elecciones  ".to_string()),
            from: Some("2025-01-01".to_string()),
            to: Some("2025-02-01".to_string()),
            categories: vec!["Mundo".to_string()],
        };
        assert_eq!(
            filter.project(),
            ListQuery::Search("elecciones".to_string())
        );
    }

    #[test]
    fn test_filter_projection_dates_need_both_ends() {
        let mut filter = ListFilter {
            from: Some("2025-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.project(), ListQuery::Default);

        filter.to = Some("2025-02-01".to_string());
        assert_eq!(
            filter.project(),
            ListQuery::DateRange("2025-01-01".to_string(), "2025-02-01".to_string())
        );
    }

    #[test]
    fn test_filter_projection_categories_then_default() {
        let filter = ListFilter {
            categories: vec!["Deportes".to_string()],
            ..Default::default()
        };
        assert_eq!(
            filter.project(),
            ListQuery::Categories(vec!["Deportes".to_string()])
        );

        assert_eq!(ListFilter::default().project(), ListQuery::Default);

        let blank = ListFilter {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.project(), ListQuery::Default);
    }
}
