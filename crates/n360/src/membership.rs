use crate::prelude::{println, *};
use crate::session::{self, Session};
use colored::Colorize;
use n360_core::plans::is_plan_disabled;
use serde::{Deserialize, Serialize};

/// Membership module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "membership")]
#[command(about = "Purchase a membership for a subscription plan")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Pay for a plan with a pre-tokenized payment source
    Subscribe(SubscribeOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
    n360 membership subscribe --plan 3 --source-id tkn_test_abc123 --email ana@example.com
    n360 membership subscribe --plan 3 --method yape --email ana@example.com")]
pub struct SubscribeOptions {
    /// Plan (producto) ID to subscribe to
    #[arg(long)]
    pub plan: u64,

    /// Card payment token (tokenization happens outside this tool)
    #[arg(long, required_unless_present = "method", conflicts_with = "method")]
    pub source_id: Option<String>,

    /// Wallet payment method
    #[arg(long, value_parser = ["yape", "plin"])]
    pub method: Option<String>,

    /// Billing email; defaults to <username>@noticias360.local
    #[arg(long)]
    pub email: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MembresiaResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "chargeId", default)]
    pub charge_id: Option<String>,
    #[serde(rename = "membresiaId", default)]
    pub membresia_id: Option<u64>,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Subscribe(options) => subscribe(options, global).await,
    }
}

/// Billing email: the explicit flag wins; otherwise one is derived from
/// the login username, which unlike the display name carries no spaces.
fn billing_email(explicit: Option<&String>, session: &Session) -> String {
    match explicit {
        Some(email) => email.clone(),
        None => format!("{}@noticias360.local", session.username.to_lowercase()),
    }
}

/// Create the membership charge for a plan
pub async fn subscribe_data(
    options: &SubscribeOptions,
    global: &crate::Global,
) -> Result<MembresiaResponse> {
    let session = session::require_session()?;

    let plan = crate::plans::fetch_plan(options.plan, global).await?;

    // Same blocking rules the portal applies before checkout.
    if is_plan_disabled(&plan, session.plan.as_deref()) {
        return Err(eyre!(
            "Plan '{}' is not available from your current plan ({})",
            plan.name,
            session.plan.as_deref().unwrap_or("none")
        ));
    }

    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(Some(&session))?;

    let email = billing_email(options.email.as_ref(), &session);

    // Wallet payments carry the method name as the source and tag the
    // description; card payments carry the pre-made token.
    let (source_id, description) = match (&options.source_id, &options.method) {
        (Some(token), _) => (token.clone(), format!("Pago de Membresía {}", plan.name)),
        (None, Some(method)) => (
            method.clone(),
            format!("Pago de Membresía {} ({})", plan.name, method),
        ),
        (None, None) => return Err(eyre!("Either --source-id or --method is required")),
    };

    let url = format!("{}/payments/membresia", config.base_url());
    let payload = serde_json::json!({
        "usuarioId": session.id,
        "productoId": plan.id,
        "sourceId": source_id,
        "email": email,
        "descripcion": description,
    });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Failed to send payment request: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Payment failed [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse payment response: {}", e))
}

async fn subscribe(options: SubscribeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Creating membership for plan {}...", options.plan);
    }

    let result = subscribe_data(&options, &global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.success {
        println!("{} {}", "Payment accepted:".green().bold(), result.message);
        if let Some(charge_id) = &result.charge_id {
            println!("{}: {}", "Charge".green(), charge_id.bright_white());
        }
        if let Some(membresia_id) = result.membresia_id {
            println!("{}: {}", "Membership".green(), membresia_id);
        }
        println!(
            "{}",
            "Log in again to refresh your session plan.".bright_black()
        );
    } else {
        return Err(eyre!(Error::PaymentFailed(result.message)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            id: 42,
            token: "tok_abc".to_string(),
            username: "APerez".to_string(),
            name: "Ana María".to_string(),
            last_name: "Pérez".to_string(),
            role: "user".to_string(),
            plan: None,
        }
    }

    #[test]
    fn test_billing_email_derives_from_username_not_display_name() {
        assert_eq!(billing_email(None, &session()), "aperez@noticias360.local");
    }

    #[test]
    fn test_billing_email_prefers_explicit_flag() {
        let explicit = "ana@example.com".to_string();
        assert_eq!(billing_email(Some(&explicit), &session()), "ana@example.com");
    }
}
