use crate::prelude::{println, *};
use colored::Colorize;
use n360_core::etl::CsvAnalysisResult;
use std::path::{Path, PathBuf};

/// ETL module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "etl")]
#[command(about = "CSV analysis and cleaning (ETL)")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Upload a CSV and show per-column null/duplicate statistics
    Analyze(AnalyzeOptions),

    /// Clean the selected columns and download the resulting CSV
    Apply(ApplyOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AnalyzeOptions {
    /// CSV file to analyze
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
    n360 etl apply datos.csv --column titulo --column autor
    n360 etl apply datos.csv --key-column url -o limpio.csv")]
pub struct ApplyOptions {
    /// CSV file to clean
    pub file: PathBuf,

    /// Column to clean (can be repeated; defaults to every column)
    #[arg(short, long = "column")]
    pub columns: Vec<String>,

    /// Deduplication key column
    #[arg(long, default_value = "url")]
    pub key_column: String,

    /// Output file
    #[arg(short, long, default_value = "limpio.csv")]
    pub output: PathBuf,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Analyze(options) => analyze(options, global).await,
        Commands::Apply(options) => apply(options, global).await,
    }
}

/// Build a multipart "file" part from a local path
pub fn csv_part(path: &Path) -> Result<reqwest::multipart::Part> {
    let bytes =
        std::fs::read(path).map_err(|e| eyre!("Failed to read {}: {}", path.display(), e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "data.csv".to_string());

    reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("text/csv")
        .map_err(|e| eyre!("Failed to build file part: {}", e))
}

/// Upload a CSV for analysis
pub async fn analyze_data(file: &Path, global: &crate::Global) -> Result<CsvAnalysisResult> {
    let config = crate::config::resolve(global)?;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().part("file", csv_part(file)?);

    let url = format!("{}/etl/analisis", config.base_url());
    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| eyre!("Failed to upload CSV: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("CSV analysis failed [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse analysis response: {}", e))
}

/// Upload a CSV for cleaning and return the cleaned bytes
pub async fn apply_data(options: &ApplyOptions, global: &crate::Global) -> Result<Vec<u8>> {
    let config = crate::config::resolve(global)?;
    let client = reqwest::Client::new();

    // No explicit column selection means "clean everything the
    // analysis saw", same as the portal's select-all default.
    let columns = if options.columns.is_empty() {
        analyze_data(&options.file, global).await?.column_names()
    } else {
        options.columns.clone()
    };

    let mut form = reqwest::multipart::Form::new().part("file", csv_part(&options.file)?);
    for column in columns {
        form = form.text("columnas", column);
    }
    form = form.text("keyColumn", options.key_column.clone());

    let url = format!("{}/etl/aplicar", config.base_url());
    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| eyre!("Failed to upload CSV: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("ETL apply failed [{}]: {}", status, body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| eyre!("Failed to download cleaned CSV: {}", e))?;

    Ok(bytes.to_vec())
}

async fn analyze(options: AnalyzeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Analyzing {}...", options.file.display());
    }

    let result = analyze_data(&options.file, &global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Analyzed".green(),
        result.total_rows.to_string().bright_cyan().bold(),
        "rows".green()
    );

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Column",
        "Nulls",
        "Null %",
        "Duplicates",
        "Duplicate %"
    ]);
    for column in &result.columns {
        table.add_row(prettytable::row![
            column.name,
            column.null_count,
            format!("{:.1}%", column.null_percent),
            column.duplicate_count,
            format!("{:.1}%", column.duplicate_percent)
        ]);
    }
    table.printstd();

    Ok(())
}

async fn apply(options: ApplyOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Cleaning {}...", options.file.display());
    }

    let bytes = apply_data(&options, &global).await?;

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
