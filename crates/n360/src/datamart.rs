use crate::prelude::{println, *};
use colored::Colorize;
use n360_core::etl::{suggested_dimensions, suggested_measures, DatamartAnalysisResult};
use std::path::{Path, PathBuf};

/// Datamart module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "datamart")]
#[command(about = "Datamart analysis and star-schema export")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Upload a CSV and show dimension/measure candidates
    Analyze(AnalyzeOptions),

    /// Build the star schema and download it as a ZIP
    Build(BuildOptions),
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
    n360 datamart build datos.csv --name noticias
    n360 datamart build datos.csv --name noticias --dimension categoria --measure visitas")]
pub struct BuildOptions {
    /// CSV file to build from
    pub file: PathBuf,

    /// Datamart name
    #[arg(long)]
    pub name: String,

    /// Dimension column (can be repeated; defaults to the suggested ones)
    #[arg(short, long = "dimension")]
    pub dimensions: Vec<String>,

    /// Measure column (can be repeated; defaults to the suggested ones)
    #[arg(short, long = "measure")]
    pub measures: Vec<String>,

    /// Output file
    #[arg(short, long, default_value = "datamart.zip")]
    pub output: PathBuf,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Analyze(options) => analyze(options, global).await,
        Commands::Build(options) => build(options, global).await,
    }
}

/// Upload a CSV for datamart analysis
pub async fn analyze_data(file: &Path, global: &crate::Global) -> Result<DatamartAnalysisResult> {
    let config = crate::config::resolve(global)?;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().part("file", crate::etl::csv_part(file)?);

    let url = format!("{}/datamart/analisis", config.base_url());
    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| eyre!("Failed to upload CSV: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Datamart analysis failed [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse analysis response: {}", e))
}

/// Build the star schema and return the ZIP bytes
pub async fn build_data(options: &BuildOptions, global: &crate::Global) -> Result<Vec<u8>> {
    let config = crate::config::resolve(global)?;
    let client = reqwest::Client::new();

    // Default the selection to the analysis suggestions, like the
    // portal's pre-checked candidates.
    let (dimensions, measures) = if options.dimensions.is_empty() || options.measures.is_empty() {
        let analysis = analyze_data(&options.file, global).await?;
        let dimensions = if options.dimensions.is_empty() {
            suggested_dimensions(&analysis)
        } else {
            options.dimensions.clone()
        };
        let measures = if options.measures.is_empty() {
            suggested_measures(&analysis)
        } else {
            options.measures.clone()
        };
        (dimensions, measures)
    } else {
        (options.dimensions.clone(), options.measures.clone())
    };

    if dimensions.is_empty() {
        return Err(eyre!(
            "No dimensions selected and the analysis suggested none; pass --dimension"
        ));
    }

    let mut form = reqwest::multipart::Form::new()
        .part("file", crate::etl::csv_part(&options.file)?)
        .text("nombre", options.name.clone());
    for dimension in dimensions {
        form = form.text("dimensiones", dimension);
    }
    for measure in measures {
        form = form.text("medidas", measure);
    }

    let url = format!("{}/datamart/construir-y-exportar-zip", config.base_url());
    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| eyre!("Failed to upload CSV: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Datamart build failed [{}]: {}", status, body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| eyre!("Failed to download datamart ZIP: {}", e))?;

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

    println!("\n{}", "DIMENSION CANDIDATES".bright_cyan().bold());
    let mut dims = new_table();
    dims.add_row(prettytable::row![
        "Column",
        "Distinct",
        "Ratio",
        "Suggested",
        "Samples"
    ]);
    for candidate in &result.dimension_candidates {
        dims.add_row(prettytable::row![
            candidate.name,
            candidate.distinct_count,
            format!("{:.2}", candidate.distinct_ratio),
            if candidate.suggested { "yes" } else { "" },
            candidate.sample_values.join(", ")
        ]);
    }
    dims.printstd();

    println!("\n{}", "MEASURE CANDIDATES".bright_cyan().bold());
    let mut measures = new_table();
    measures.add_row(prettytable::row![
        "Column",
        "Non-null",
        "Numeric ratio",
        "Suggested"
    ]);
    for candidate in &result.measure_candidates {
        measures.add_row(prettytable::row![
            candidate.name,
            candidate.non_null_count,
            format!("{:.2}", candidate.numeric_ratio),
            if candidate.suggested { "yes" } else { "" }
        ]);
    }
    measures.printstd();

    Ok(())
}

async fn build(options: BuildOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Building datamart '{}'...", options.name);
    }

    let bytes = build_data(&options, &global).await?;

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
