//! CLI for resolving the pass view of an event
//!
//! Runs one resolution against the configured API and prints the result.
//! Logs and notifications go to stderr; the view goes to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use event_pass::console::{LoggingNavigator, StderrNotifier};
use event_pass::{AccessStateResolver, ApiClient, Config, ResolverDeps};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pass-lookup")]
#[command(about = "Resolve which pass view an event shows")]
struct Cli {
    /// Event identifier (omit to see the redirect path)
    event_id: Option<String>,

    /// Print the full view state as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,event_pass=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let api = Arc::new(ApiClient::from_config(&config).context("Failed to build API client")?);
    tracing::debug!(base_url = %api.base_url(), "API client ready");

    let resolver = AccessStateResolver::new(ResolverDeps {
        identity: api.clone(),
        events: api.clone(),
        passes: api,
        notifier: Arc::new(StderrNotifier),
        navigator: Arc::new(LoggingNavigator),
    })
    .with_default_route(config.default_route);

    let view = resolver.resolve(cli.event_id.as_deref()).await;

    if cli.json {
        let output = serde_json::to_string_pretty(&view).context("Failed to serialize view")?;
        println!("{}", output);
    } else {
        println!("{}", view.kind());
    }

    Ok(())
}
