use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use n360_core::news::{to_article, Article, DbArticle};

pub mod export;
pub mod list;
pub mod read;

/// News module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "news")]
#[command(about = "News listings, detail, categories and CSV export")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List articles with optional text/date/category filters
    List(list::ListOptions),

    /// Read a single article, formatted
    Read(read::ReadOptions),

    /// List the available categories
    Categories(CategoriesOptions),

    /// Show the trending articles
    Trending(TrendingOptions),

    /// Subscribe an email address to the newsletter
    Subscribe(SubscribeOptions),

    /// Export articles as CSV to a local file
    Export(export::ExportOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CategoriesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TrendingOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SubscribeOptions {
    /// Email address to subscribe
    pub email: String,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Read(options) => read::run(options, global).await,
        Commands::Categories(options) => categories(options, global).await,
        Commands::Trending(options) => trending(options, global).await,
        Commands::Subscribe(options) => subscribe(options, global).await,
        Commands::Export(options) => export::run(options, global).await,
    }
}

/// Fetch the list of available categories
pub async fn categories_data(global: &crate::Global) -> Result<Vec<String>> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/articulos/categorias", config.base_url());
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch categories: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch categories [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse categories response: {}", e))
}

async fn categories(options: CategoriesOptions, global: crate::Global) -> Result<()> {
    let categories = categories_data(&global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!("{}", "No categories available.".yellow());
        return Ok(());
    }

    println!("{}", "CATEGORIES".bright_cyan().bold());
    for category in &categories {
        println!("  {} {}", "-".green(), category);
    }

    Ok(())
}

/// Fetch the trending articles
pub async fn trending_data(global: &crate::Global) -> Result<Vec<Article>> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/articulos/trending", config.base_url());
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch trending articles: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!(
            "Failed to fetch trending articles [{}]: {}",
            status,
            body
        ));
    }

    let rows: Vec<DbArticle> = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse trending response: {}", e))?;

    Ok(rows.into_iter().map(to_article).collect())
}

async fn trending(options: TrendingOptions, global: crate::Global) -> Result<()> {
    let articles = trending_data(&global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("{}", "No trending articles right now.".yellow());
        return Ok(());
    }

    println!("{}", "TRENDING".bright_cyan().bold());
    for article in &articles {
        println!(
            "  {} {} ({})",
            format!("[{}]", article.id).yellow(),
            article.title.bold(),
            n360_core::news::format_published(&article.published_at).bright_black()
        );
    }

    Ok(())
}

async fn subscribe(options: SubscribeOptions, global: crate::Global) -> Result<()> {
    let config = crate::config::resolve(&global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/articulos/newsletter", config.base_url());
    let payload = serde_json::json!({ "email": options.email });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Failed to send subscription request: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Subscription failed [{}]: {}", status, body));
    }

    println!(
        "{} {}",
        "Subscribed".green(),
        options.email.bright_white().bold()
    );

    Ok(())
}
