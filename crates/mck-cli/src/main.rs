use std::time::Duration;

use clap::Parser;

use mck_client::Session;
use mck_config::MckConfig;
use mck_scenario::ScenarioError;

mod cli;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    if let Err(error) = run(&cli).await {
        report(&error);
        std::process::exit(1);
    }
}

async fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    init_tracing(cli.quiet, cli.verbose)?;

    let config = MckConfig::load_with_dotenv()?;
    let base_url = cli.base_url.as_deref().map_or_else(
        || config.api.normalized_base_url(),
        |url| url.trim_end_matches('/').to_string(),
    );
    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.api.timeout_secs));

    tracing::debug!(%base_url, timeout_secs = timeout.as_secs(), "starting smoke run");

    let mut session = Session::new(base_url, timeout);
    mck_scenario::run(&mut session).await?;

    println!("All API checks passed.");
    Ok(())
}

/// Print the failure with the kind-appropriate prefix. Both kinds exit 1;
/// they only read differently.
fn report(error: &anyhow::Error) {
    match error.downcast_ref::<ScenarioError>() {
        Some(scenario) if scenario.is_transport() => eprintln!("Request error: {scenario}"),
        Some(scenario) => eprintln!("API check failed: {scenario}"),
        None => eprintln!("mck error: {error:#}"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MINDCHECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
