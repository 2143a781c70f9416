//! Vaultline - command-line entry point
//!
//! Usage: `vaultline [status|health|login <email>|logout]`
//! `login` reads the password from `VAULTLINE_PASSWORD`.

use std::time::Duration;

use anyhow::{bail, Context};
use tracing::{info, warn};
use vaultline_app::utils::logging::init_tracing;
use vaultline_app::AppContext;
use vaultline_domain::Config;

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!(?path, "Loaded .env"),
        Err(e) => tracing::debug!("No .env file loaded: {e}"),
    }

    let config = vaultline_infra::config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Falling back to default configuration");
        Config::default()
    });

    let context = AppContext::new(config).context("failed to initialize application")?;
    let state = context.wait_until_ready(STARTUP_TIMEOUT).await;
    info!(session = state.label(), "Vaultline ready");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["status"] => print_status(&context),
        ["health"] => {
            let report = vaultline_app::get_app_health(&context).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ["login", email] => {
            let password =
                std::env::var("VAULTLINE_PASSWORD").context("VAULTLINE_PASSWORD is not set")?;
            vaultline_app::login(&context, email, &password).await?;
            print_status(&context);
        }
        ["logout"] => {
            vaultline_app::logout(&context).await?;
            print_status(&context);
        }
        other => bail!("unknown command: {}", other.join(" ")),
    }

    for notification in vaultline_app::list_notifications(&context) {
        println!("[{}] {}: {}", notification.kind, notification.title, notification.message);
    }

    Ok(())
}

fn print_status(context: &AppContext) {
    let state = vaultline_app::session_state(context);
    match state.user().and_then(|user| user.email()) {
        Some(email) => println!("{}: {email}", state.label()),
        None => println!("{}", state.label()),
    }
}
