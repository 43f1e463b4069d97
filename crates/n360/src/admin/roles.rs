use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all roles
    List(ListOptions),

    /// Show one role
    Show(IdOptions),

    /// Create a role
    Create(SaveOptions),

    /// Update a role
    Update(UpdateOptions),

    /// Delete a role
    Delete(IdOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct IdOptions {
    /// Role ID
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SaveOptions {
    /// Role name
    #[arg(long)]
    pub name: String,

    /// Role description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// Role ID
    pub id: u64,

    #[clap(flatten)]
    pub save: SaveOptions,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Role {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

fn save_payload(options: &SaveOptions) -> serde_json::Value {
    serde_json::json!({
        "nombre": options.name,
        "descripcion": options.description,
    })
}

/// Module entry point
pub async fn run(command: Commands, global: crate::Global) -> Result<()> {
    let session = super::require_admin_session()?;
    let config = crate::config::resolve(&global)?;
    let client = session::create_portal_client(Some(&session))?;
    let base_url = format!("{}/roles", config.base_url());

    match command {
        Commands::List(options) => {
            let response = client
                .get(&base_url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to fetch roles: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to fetch roles [{}]: {}", status, body));
            }

            let roles: Vec<Role> = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse roles response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&roles)?);
            } else {
                print_roles(&roles);
            }
        }
        Commands::Show(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to fetch role: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to fetch role {} [{}]: {}", options.id, status, body));
            }

            let role: Role = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse role response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&role)?);
            } else {
                print_roles(std::slice::from_ref(&role));
            }
        }
        Commands::Create(options) => {
            let response = client
                .post(&base_url)
                .json(&save_payload(&options))
                .send()
                .await
                .map_err(|e| eyre!("Failed to create role: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to create role [{}]: {}", status, body));
            }

            let role: Role = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse role response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&role)?);
            } else {
                println!("{} {} ({})", "Created role".green(), role.name.bold(), role.id);
            }
        }
        Commands::Update(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .put(&url)
                .json(&save_payload(&options.save))
                .send()
                .await
                .map_err(|e| eyre!("Failed to update role: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to update role [{}]: {}", status, body));
            }

            let role: Role = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse role response: {}", e))?;

            if options.save.json {
                println!("{}", serde_json::to_string_pretty(&role)?);
            } else {
                println!("{} {}", "Updated role".green(), role.name.bold());
            }
        }
        Commands::Delete(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .delete(&url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to delete role: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to delete role [{}]: {}", status, body));
            }

            println!("{} {}", "Deleted role".green(), options.id);
        }
    }

    Ok(())
}

fn print_roles(roles: &[Role]) {
    if roles.is_empty() {
        println!("{}", "No roles found.".yellow());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Name", "Description"]);
    for role in roles {
        table.add_row(prettytable::row![role.id, role.name, role.description]);
    }
    table.printstd();
}
