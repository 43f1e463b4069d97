#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod admin;
mod auth;
mod chat;
mod config;
mod datamart;
mod error;
mod etl;
mod membership;
mod news;
mod plans;
mod prelude;
mod requests;
mod session;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Command-line client for the Noticias360 content portal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Portal API base URL
    #[clap(long, env = "N360_API_URL", global = true)]
    api_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "N360_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Login, logout and session inspection
    Auth(crate::auth::App),

    /// News listings, detail, categories and CSV export
    News(crate::news::App),

    /// Subscription plans and their features
    Plans(crate::plans::App),

    /// Purchase a membership for a subscription plan
    Membership(crate::membership::App),

    /// Talk to the portal's AI assistant
    Chat(crate::chat::App),

    /// CSV analysis and cleaning (ETL)
    Etl(crate::etl::App),

    /// Datamart analysis and star-schema export
    Datamart(crate::datamart::App),

    /// News submission requests
    Requests(crate::requests::App),

    /// Admin operations (users, roles, scrapers)
    Admin(crate::admin::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Auth(sub_app) => crate::auth::run(sub_app, app.global).await,
        SubCommands::News(sub_app) => crate::news::run(sub_app, app.global).await,
        SubCommands::Plans(sub_app) => crate::plans::run(sub_app, app.global).await,
        SubCommands::Membership(sub_app) => crate::membership::run(sub_app, app.global).await,
        SubCommands::Chat(sub_app) => crate::chat::run(sub_app, app.global).await,
        SubCommands::Etl(sub_app) => crate::etl::run(sub_app, app.global).await,
        SubCommands::Datamart(sub_app) => crate::datamart::run(sub_app, app.global).await,
        SubCommands::Requests(sub_app) => crate::requests::run(sub_app, app.global).await,
        SubCommands::Admin(sub_app) => crate::admin::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
