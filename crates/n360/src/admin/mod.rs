use crate::prelude::*;
use crate::session::{self, Session};

pub mod roles;
pub mod scrapers;
pub mod users;

/// Admin module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "admin")]
#[command(about = "Admin operations (users, roles, scrapers)")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// User management
    #[clap(subcommand)]
    Users(users::Commands),

    /// Role management
    #[clap(subcommand)]
    Roles(roles::Commands),

    /// Scraper management
    #[clap(subcommand)]
    Scrapers(scrapers::Commands),
}

/// Load the session and verify the admin role
pub fn require_admin_session() -> Result<Session> {
    let session = session::require_session()?;
    if !session.is_admin() {
        return Err(eyre!(Error::PermissionDenied(
            "this command requires the admin role".to_string()
        )));
    }
    Ok(session)
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Users(cmd) => users::run(cmd, global).await,
        Commands::Roles(cmd) => roles::run(cmd, global).await,
        Commands::Scrapers(cmd) => scrapers::run(cmd, global).await,
    }
}
