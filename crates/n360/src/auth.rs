use crate::prelude::{println, *};
use crate::session::{self, Session};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Auth module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "auth")]
#[command(about = "Login, logout and session inspection")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Log in and store the session locally
    Login(LoginOptions),

    /// Remove the stored session
    Logout,

    /// Show the currently stored session
    Whoami(WhoamiOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct LoginOptions {
    /// Portal username
    #[clap(env = "N360_USERNAME")]
    pub username: String,

    /// Portal password
    #[clap(env = "N360_PASSWORD")]
    pub password: String,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct WhoamiOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    id: u64,
    role: String,
    #[serde(default)]
    plan: Option<String>,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Login(options) => login(options, global).await,
        Commands::Logout => logout(),
        Commands::Whoami(options) => whoami(options),
    }
}

/// Authenticate against the portal and return the resulting session
pub async fn login_data(options: LoginOptions, global: &crate::Global) -> Result<Session> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/login", config.auth_url.trim_end_matches('/'));
    let username = options.username.clone();
    let payload = serde_json::json!({
        "username": options.username,
        "password": options.password,
    });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Failed to send login request: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Login failed [{}]: {}", status, body));
    }

    let res: LoginResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse login response: {}", e))?;

    Ok(Session {
        id: res.id,
        token: res.token,
        username,
        name: res.name,
        last_name: res.last_name,
        role: res.role,
        plan: res.plan,
    })
}

async fn login(options: LoginOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Logging in as {}...", options.username);
    }

    let session = login_data(options, &global).await?;

    let dir = session::session_dir()?;
    session::save_session(&dir, &session)?;

    println!(
        "{} {} ({})",
        "Logged in as".green(),
        session.display_name().bold(),
        session.role.cyan()
    );
    if let Some(plan) = &session.plan {
        println!("{}: {}", "Plan".green(), plan.bright_white());
    }

    Ok(())
}

fn logout() -> Result<()> {
    let dir = session::session_dir()?;
    session::clear_session(&dir)?;
    println!("{}", "Session cleared.".green());
    Ok(())
}

fn whoami(options: WhoamiOptions) -> Result<()> {
    let dir = session::session_dir()?;
    let session = session::load_session(&dir)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    match session {
        Some(s) => {
            println!("{}: {}", "User".green(), s.display_name().bold());
            println!("{}: {}", "Role".green(), s.role.cyan());
            println!(
                "{}: {}",
                "Plan".green(),
                s.plan.as_deref().unwrap_or("(none)").bright_white()
            );
        }
        None => println!("{}", "Not logged in.".yellow()),
    }

    Ok(())
}
