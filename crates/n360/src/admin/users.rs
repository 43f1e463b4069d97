use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all users
    List(ListOptions),

    /// Show one user
    Show(IdOptions),

    /// Create a user
    Create(SaveOptions),

    /// Update a user
    Update(UpdateOptions),

    /// Delete a user
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
    /// User ID
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SaveOptions {
    /// Username
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// First name
    #[arg(long)]
    pub name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Role ID
    #[arg(long)]
    pub role_id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// User ID
    pub id: u64,

    #[clap(flatten)]
    pub save: SaveOptions,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UserRole {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(rename = "rol", default)]
    pub role: Option<UserRole>,
}

fn save_payload(options: &SaveOptions) -> serde_json::Value {
    serde_json::json!({
        "username": options.username,
        "email": options.email,
        "name": options.name,
        "lastName": options.last_name,
        "roleId": options.role_id,
    })
}

/// Module entry point
pub async fn run(command: Commands, global: crate::Global) -> Result<()> {
    let session = super::require_admin_session()?;
    let config = crate::config::resolve(&global)?;
    let client = session::create_portal_client(Some(&session))?;
    let base_url = format!("{}/usuarios", config.base_url());

    match command {
        Commands::List(options) => {
            let response = client
                .get(&base_url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to fetch users: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to fetch users [{}]: {}", status, body));
            }

            let users: Vec<User> = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse users response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                print_users(&users);
            }
        }
        Commands::Show(options) => {
            let user = fetch_user(&client, &base_url, options.id).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                print_users(std::slice::from_ref(&user));
            }
        }
        Commands::Create(options) => {
            let response = client
                .post(&base_url)
                .json(&save_payload(&options))
                .send()
                .await
                .map_err(|e| eyre!("Failed to create user: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to create user [{}]: {}", status, body));
            }

            let user: User = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse user response: {}", e))?;

            if options.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{} {} ({})", "Created user".green(), user.username.bold(), user.id);
            }
        }
        Commands::Update(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .put(&url)
                .json(&save_payload(&options.save))
                .send()
                .await
                .map_err(|e| eyre!("Failed to update user: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to update user [{}]: {}", status, body));
            }

            let user: User = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse user response: {}", e))?;

            if options.save.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{} {}", "Updated user".green(), user.username.bold());
            }
        }
        Commands::Delete(options) => {
            let url = format!("{}/{}", base_url, options.id);
            let response = client
                .delete(&url)
                .send()
                .await
                .map_err(|e| eyre!("Failed to delete user: {}", e))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(eyre!("Failed to delete user [{}]: {}", status, body));
            }

            println!("{} {}", "Deleted user".green(), options.id);
        }
    }

    Ok(())
}

async fn fetch_user(client: &reqwest::Client, base_url: &str, id: u64) -> Result<User> {
    let url = format!("{base_url}/{id}");
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch user: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch user {} [{}]: {}", id, status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse user response: {}", e))
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("{}", "No users found.".yellow());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Username", "Name", "Email", "Role"]);
    for user in users {
        table.add_row(prettytable::row![
            user.id,
            user.username,
            format!("{} {}", user.name, user.last_name),
            user.email,
            user.role.as_ref().map(|r| r.name.as_str()).unwrap_or("")
        ]);
    }
    table.printstd();
}
