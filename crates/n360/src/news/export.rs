use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
    n360 news export
    n360 news export --category Deportes --category Politica
    n360 news export --from 2025-01-01 --to 2025-02-01
    n360 news export --category Mundo --from 2025-01-01 --to 2025-02-01 -o mundo.csv")]
pub struct ExportOptions {
    /// Filter by category (can be repeated)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Start date (YYYY-MM-DD); requires --to
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD); requires --from
    #[arg(long)]
    pub to: Option<String>,

    /// Output file
    #[arg(short, long, default_value = "articulos.csv")]
    pub output: PathBuf,
}

pub async fn run(options: ExportOptions, global: crate::Global) -> Result<()> {
    if options.from.is_some() != options.to.is_some() {
        return Err(eyre!("--from and --to must be given together"));
    }

    if global.verbose {
        println!("Exporting articles...");
    }

    let bytes = export_data(&options, &global).await?;

    std::fs::write(&options.output, &bytes)
        .map_err(|e| eyre!("Failed to write {}: {}", options.output.display(), e))?;

    println!(
        "{} {} ({} bytes)",
        "Wrote".green(),
        options.output.display().to_string().bright_white().bold(),
        bytes.len()
    );

    Ok(())
}

/// Download the CSV export the filters select
pub async fn export_data(options: &ExportOptions, global: &crate::Global) -> Result<Vec<u8>> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;
    let base_url = config.base_url();

    let joined = options.categories.join(",");
    let dates = options.from.as_deref().zip(options.to.as_deref());

    let request = match (options.categories.is_empty(), dates) {
        (false, Some((from, to))) => client
            .get(format!("{base_url}/articulos/export-csv-filtros"))
            .query(&[("categoria", joined.as_str()), ("desde", from), ("hasta", to)]),
        (false, None) => client
            .get(format!("{base_url}/articulos/export-csv-por-categoria"))
            .query(&[("categoria", joined.as_str())]),
        (true, Some((from, to))) => client
            .get(format!("{base_url}/articulos/export-csv-fecha"))
            .query(&[("desde", from), ("hasta", to)]),
        (true, None) => client.get(format!("{base_url}/articulos/export-csv")),
    };

    let response = request
        .send()
        .await
        .map_err(|e| eyre!("Failed to request CSV export: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("CSV export failed [{}]: {}", status, body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| eyre!("Failed to download CSV export: {}", e))?;

    Ok(bytes.to_vec())
}
