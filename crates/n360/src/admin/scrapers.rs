use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the configured scrapers
    List(ListOptions),

    /// Register a scraper
    Create(SaveOptions),

    /// Update a scraper
    Update(UpdateOptions),

    /// Delete a scraper
    Delete(IdOptions),

    /// Run a scraper against a URL
    Run(RunOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct IdOptions {
    /// Scraper ID
    pub id: u64,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SaveOptions {
    /// Display name of the scraped site
    #[arg(long)]
    pub name: String,

    /// URL the scraper targets
    #[arg(long)]
    pub url: String,

    /// Logo image URL
    #[arg(long, default_value = "")]
    pub logo_url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// Scraper ID
    pub id: u64,

    #[clap(flatten)]
    pub save: SaveOptions,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct RunOptions {
    /// URL to scrape
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Backend scraper row. The backend field is `logo`; the domain name
/// is `logo_url`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Scraper {
    pub id: u64,
    #[serde(rename = "logo", default)]
    pub logo_url: String,
    #[serde(rename = "nombrePagina")]
    pub site_name: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RunScraperResponse {
    pub url: String,
    #[serde(rename = "articulosGuardados")]
    pub articles_saved: u64,
}

fn save_payload(options: &SaveOptions) -> serde_json::Value {
    serde_json::json!({
        "logo": options.logo_url,
        "nombrePagina": options.name,
        "url": options.url,
    })
}

/// Module entry point
pub async fn run(command: Commands, global: crate::Global) -> Result<()> {
    let session = super::require_admin_session()?;
    let config = crate::config::resolve(&global)?;
    let client = session::create_portal_client(Some(&session))?;
    let base_url = format!("{}/scrappers", config.base_url());

    match command {
        Commands::List(options) => {
            let response = client
                .get(&base_url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to fetch scrapers: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to fetch scrapers [{}]: {}", status, body));
            }

            let scrapers: Vec<Scraper> = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse scrapers response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&scrapers)?);
            } else {
                print_scrapers(&scrapers);
            }
        }
        Commands::Create(options) => {
            let response = client
                .post(&base_url)
                .json(&save_payload(&options))
                .send()
                .await
                .map_err(|e| eyre!("Failed to create scraper: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to create scraper [{}]: {}", status, body));
            }

            let scraper: Scraper = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse scraper response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&scraper)?);
            } else {
                println!(
                    "{} {} ({})",
                    "Created scraper".green(),
                    scraper.site_name.bold(),
                    scraper.id
                );
            }
        }
        Commands::Update(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .put(&url)
                .json(&save_payload(&options.save))
                .send()
                .await
                .map_err(|e| eyre!("Failed to update scraper: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to update scraper [{}]: {}", status, body));
            }

            let scraper: Scraper = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse scraper response: {}", e))?;

            if options.save.json {
                println!("{}", serde_json::to_string_pretty(&scraper)?);
            } else {
                println!("{} {}", "Updated scraper".green(), scraper.site_name.bold());
            }
        }
        Commands::Delete(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .delete(&url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to delete scraper: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to delete scraper [{}]: {}", status, body));
            }

            println!("{} {}", "Deleted scraper".green(), options.id);
        }
        Commands::Run(options) => run_scraper(options, &client, &base_url).await?,
    }

    Ok(())
}

async fn run_scraper(
    options: RunOptions,
    client: &reqwest::Client,
    base_url: &str,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("Failed to build spinner: {}", e))?,
    );
    spinner.set_message(format!("Scraping {}...", options.url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let url = format!("{base_url}/run");
    let payload = serde_json::json!({ "url": options.url });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Failed to run scraper: {}", e))?;

    spinner.finish_and_clear();

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Scraper run failed [{}]: {}", status, body));
    }

    let result: RunScraperResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse scraper response: {}", e))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} {} {} {}",
            "Saved".green(),
            result.articles_saved.to_string().bright_cyan().bold(),
            "articles from".green(),
            result.url.cyan()
        );
    }

    Ok(())
}

fn print_scrapers(scrapers: &[Scraper]) {
    if scrapers.is_empty() {
        println!("{}", "No scrapers configured.".yellow());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Site", "URL", "Logo"]);
    for scraper in scrapers {
        table.add_row(prettytable::row![
            scraper.id,
            scraper.site_name,
            scraper.url,
            scraper.logo_url
        ]);
    }
    table.printstd();
}
