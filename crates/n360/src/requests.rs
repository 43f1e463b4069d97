use crate::prelude::{println, *};
use crate::session::{self, Session};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Requests module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "requests")]
#[command(about = "News submission requests")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Submit a news article for review
    Create(CreateOptions),

    /// List your own submissions
    Mine(MineOptions),

    /// List every submission (admin)
    All(AllOptions),

    /// Approve a submission (admin)
    Approve(IdOptions),

    /// Reject a submission (admin)
    Reject(IdOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
    n360 requests create --title \"Nueva ley aprobada\" --author \"Ana Pérez\" \\
        --url https://fuente.example/nota --content-file nota.txt \\
        --category Politica --tag congreso")]
pub struct CreateOptions {
    /// Article title
    #[arg(long)]
    pub title: String,

    /// Article author
    #[arg(long)]
    pub author: String,

    /// Source URL
    #[arg(long)]
    pub url: String,

    /// Publication date (ISO, e.g. 2025-09-11T00:00:00)
    #[arg(long)]
    pub published: String,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// File with the article body (plain text)
    #[arg(long)]
    pub content_file: std::path::PathBuf,

    /// Tag (can be repeated)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Category (can be repeated)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct MineOptions {
    /// Filter by status (PENDIENTE, APROBADA, RECHAZADA)
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct AllOptions {
    /// Filter by status (PENDIENTE, APROBADA, RECHAZADA)
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct IdOptions {
    /// Submission ID
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Backend `solicitudes-noticias` row.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewsRequest {
    pub id: u64,
    pub url: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor", default)]
    pub author: String,
    #[serde(rename = "fechaPublicado", default)]
    pub published_at: String,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: String,
    #[serde(rename = "contenido", default)]
    pub content: String,
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "categorias", default)]
    pub categories: String,
    #[serde(rename = "usuarioId", default)]
    pub user_id: u64,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "creadoEn", default)]
    pub created_at: Option<String>,
}

fn require_admin(session: &Session) -> Result<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(eyre!(Error::PermissionDenied(
            "this command requires the admin role".to_string()
        )))
    }
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Create(options) => create(options, global).await,
        Commands::Mine(options) => mine(options, global).await,
        Commands::All(options) => all(options, global).await,
        Commands::Approve(options) => resolve(options, "aprobar", global).await,
        Commands::Reject(options) => resolve(options, "rechazar", global).await,
    }
}

async fn create(options: CreateOptions, global: crate::Global) -> Result<()> {
    let session = session::require_session()?;
    let config = crate::config::resolve(&global)?;
    let client = session::create_portal_client(Some(&session))?;

    let content = std::fs::read_to_string(&options.content_file).map_err(|e| {
        eyre!(
            "Failed to read {}: {}",
            options.content_file.display(),
            e
        )
    })?;

    let url = format!("{}/solicitudes-noticias", config.base_url());
    let payload = serde_json::json!({
        "url": options.url,
        "titulo": options.title,
        "autor": options.author,
        "fechaPublicado": options.published,
        "imagenUrl": options.image_url,
        "contenido": content,
        "tags": options.tags.join(","),
        "categorias": options.categories.join(","),
        "usuarioId": session.id,
    });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Failed to submit request: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Submission failed [{}]: {}", status, body));
    }

    let created: NewsRequest = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse submission response: {}", e))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!(
            "{} {} ({})",
            "Submitted".green(),
            created.title.bold(),
            created.status.as_deref().unwrap_or("PENDIENTE").cyan()
        );
    }

    Ok(())
}

/// Query pairs for the submission listings; reqwest percent-encodes them.
fn list_query(user_id: Option<u64>, status: Option<&String>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(id) = user_id {
        query.push(("usuarioId", id.to_string()));
    }
    if let Some(status) = status {
        query.push(("estado", status.clone()));
    }
    query
}

async fn fetch_requests(
    url: String,
    query: &[(&str, String)],
    session: &Session,
) -> Result<Vec<NewsRequest>> {
    let client = session::create_portal_client(Some(session))?;

    let response = client
        .get(&url)
        .query(query)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch submissions: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch submissions [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse submissions response: {}", e))
}

fn print_requests(requests: &[NewsRequest]) {
    if requests.is_empty() {
        println!("{}", "No submissions found.".yellow());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Title", "Author", "Status", "Created"]);
    for request in requests {
        table.add_row(prettytable::row![
            request.id,
            request.title,
            request.author,
            request.status.as_deref().unwrap_or("PENDIENTE"),
            request.created_at.as_deref().unwrap_or("")
        ]);
    }
    table.printstd();
}

async fn mine(options: MineOptions, global: crate::Global) -> Result<()> {
    let session = session::require_session()?;
    let config = crate::config::resolve(&global)?;

    let url = format!("{}/solicitudes-noticias/mias", config.base_url());
    let query = list_query(Some(session.id), options.status.as_ref());

    let requests = fetch_requests(url, &query, &session).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&requests)?);
    } else {
        print_requests(&requests);
    }

    Ok(())
}

async fn all(options: AllOptions, global: crate::Global) -> Result<()> {
    let session = session::require_session()?;
    require_admin(&session)?;
    let config = crate::config::resolve(&global)?;

    let url = format!("{}/solicitudes-noticias", config.base_url());
    let query = list_query(None, options.status.as_ref());

    let requests = fetch_requests(url, &query, &session).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&requests)?);
    } else {
        print_requests(&requests);
    }

    Ok(())
}

async fn resolve(options: IdOptions, action: &str, global: crate::Global) -> Result<()> {
    let session = session::require_session()?;
    require_admin(&session)?;
    let config = crate::config::resolve(&global)?;
    let client = session::create_portal_client(Some(&session))?;

    let url = format!(
        "{}/solicitudes-noticias/{}/{}",
        config.base_url(),
        options.id,
        action
    );

    let response = client
        .post(&url)
        .json(&serde_json::json!({}))
        .send()
        .await
        .map_err(|e| eyre!("Failed to update submission: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!(
            "Failed to update submission {} [{}]: {}",
            options.id,
            status,
            body
        ));
    }

    let updated: NewsRequest = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse submission response: {}", e))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!(
            "{} {} {} {}",
            "Submission".green(),
            updated.id.to_string().bold(),
            "is now".green(),
            updated.status.as_deref().unwrap_or("?").cyan().bold()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_pairs() {
        let status = "PENDIENTE".to_string();
        assert_eq!(
            list_query(Some(7), Some(&status)),
            vec![
                ("usuarioId", "7".to_string()),
                ("estado", "PENDIENTE".to_string())
            ]
        );
        assert!(list_query(None, None).is_empty());
    }

    #[test]
    fn test_status_filter_is_percent_encoded() {
        let client = reqwest::Client::new();
        let status = "EN REVISIÓN".to_string();

        let request = client
            .get("http://localhost/api/solicitudes-noticias/mias")
            .query(&list_query(Some(7), Some(&status)))
            .build()
            .unwrap();

        let url = request.url().as_str();
        assert!(url.contains("usuarioId=7"));
        assert!(url.contains("REVISI%C3%93N"));
        assert!(!url.contains(' '));
    }
}
