use crate::prelude::{println, *};
use crate::session;
use n360_core::chat::{clean_reply, ChatRequest, ChatResponse};
use std::io::Write;
use std::time::Duration;

const TYPEWRITER_DELAY_MS: u64 = 20;

/// Chat module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "chat")]
#[command(about = "Talk to the portal's AI assistant")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Send a message and print the assistant's reply
    Ask(AskOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AskOptions {
    /// The message to send
    pub message: String,

    /// Print the reply at once instead of character by character
    #[arg(long)]
    pub no_typing: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Ask(options) => ask(options, global).await,
    }
}

/// Send a chat message and return the cleaned reply
pub async fn ask_data(message: String, global: &crate::Global) -> Result<String> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/chat", config.base_url());
    let payload = ChatRequest { message };

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Failed to send chat message: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Chat request failed [{}]: {}", status, body));
    }

    let res: ChatResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse chat response: {}", e))?;

    Ok(clean_reply(&res.reply))
}

async fn ask(options: AskOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Sending message to assistant...");
    }

    let reply = ask_data(options.message, &global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "reply": reply }))?);
        return Ok(());
    }

    if options.no_typing {
        println!("{}", reply);
        return Ok(());
    }

    typewriter(&reply).await?;
    Ok(())
}

/// Print the reply character by character, like the portal's chat widget
async fn typewriter(text: &str) -> Result<()> {
    let mut stdout = anstream::stdout().lock();

    for c in text.chars() {
        write!(stdout, "{c}").map_err(|e| eyre!("Failed to write reply: {}", e))?;
        stdout
            .flush()
            .map_err(|e| eyre!("Failed to flush output: {}", e))?;
        tokio::time::sleep(Duration::from_millis(TYPEWRITER_DELAY_MS)).await;
    }
    writeln!(stdout).map_err(|e| eyre!("Failed to write reply: {}", e))?;

    Ok(())
}
