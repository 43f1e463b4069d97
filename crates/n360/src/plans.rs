use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use n360_core::plans::{active_subscriptions, resolve_features, Plan};

/// Plans module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "plans")]
#[command(about = "Subscription plans and their features")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the active subscription plans
    List(ListOptions),

    /// Show one plan with its resolved feature list
    Show(ShowOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Plan ID
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct PlanOutput {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub features: Vec<String>,
}

fn to_output(plan: Plan) -> PlanOutput {
    let features = resolve_features(&plan.name, plan.price);
    PlanOutput {
        id: plan.id,
        name: plan.name,
        description: plan.description,
        price: plan.price,
        features,
    }
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list(options, global).await,
        Commands::Show(options) => show(options, global).await,
    }
}

/// Fetch all plans from the backend
pub async fn fetch_plans(global: &crate::Global) -> Result<Vec<Plan>> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/productos", config.base_url());
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch plans: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch plans [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse plans response: {}", e))
}

/// Fetch a single plan by ID
pub async fn fetch_plan(id: u64, global: &crate::Global) -> Result<Plan> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/productos/{}", config.base_url(), id);
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch plan: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch plan {} [{}]: {}", id, status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse plan response: {}", e))
}

async fn list(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching subscription plans...");
    }

    let plans = active_subscriptions(fetch_plans(&global).await?);
    let outputs: Vec<PlanOutput> = plans.into_iter().map(to_output).collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    if outputs.is_empty() {
        println!("{}", "No active subscription plans.".yellow());
        return Ok(());
    }

    for plan in &outputs {
        print_plan(plan);
    }

    Ok(())
}

async fn show(options: ShowOptions, global: crate::Global) -> Result<()> {
    let plan = to_output(fetch_plan(options.id, &global).await?);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    print_plan(&plan);
    Ok(())
}

fn print_plan(plan: &PlanOutput) {
    println!(
        "\n{} {} {}",
        format!("[{}]", plan.id).yellow().bold(),
        plan.name.white().bold(),
        format!("S/ {:.2}", plan.price).bright_green()
    );

    if !plan.description.is_empty() {
        println!("    {}", plan.description.bright_black());
    }

    for feature in &plan.features {
        println!("    {} {}", "✔".green(), feature);
    }

    println!(
        "    {}: {}",
        "Subscribe".green(),
        format!("n360 membership subscribe --plan {}", plan.id).cyan()
    );
}
