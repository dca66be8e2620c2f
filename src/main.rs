mod cli;
mod config;
mod error;
mod logging;
mod notifier;
mod poller;
mod practicum;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, error, info};

use cli::{Cli, Command};
use config::{BotConfig, Credentials, Settings};
use notifier::TelegramNotifier;
use poller::{Poller, check_report};
use practicum::PracticumClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Variables already set in the environment win over `.env`.
    let dotenv = dotenvy::dotenv();

    let mut settings = Settings::load(&cli.config)?;
    if let Some(secs) = cli.retry_period {
        settings.retry_period_secs = secs;
    }

    logging::init(cli.verbose, settings.log_file())?;
    if let Ok(path) = &dotenv {
        debug!(path = %path.display(), "loaded .env");
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(settings).await,
        Command::Check { from_date } => check(&settings, from_date).await,
    }
}

fn practicum_client(settings: &Settings, token: String) -> Result<PracticumClient> {
    PracticumClient::new(
        token,
        settings.endpoint.clone(),
        settings.connect_timeout(),
        settings.request_timeout(),
    )
    .context("failed to build HTTP client")
}

async fn run(settings: Settings) -> Result<()> {
    let config = BotConfig::from_env(settings)
        .inspect_err(|e| error!(error = %e, "configuration check failed, exiting"))?;

    let client = practicum_client(&config.settings, config.credentials.practicum_token.clone())?;
    let notifier = TelegramNotifier::new(
        &config.credentials.telegram_token,
        &config.credentials.chat,
    );
    let from_date = config.settings.initial_from_date(Utc::now().timestamp());

    info!(
        endpoint = client.base_url(),
        retry_period_secs = config.settings.retry_period_secs,
        from_date,
        "starting homework bot"
    );

    let mut poller = Poller::new(client, notifier, config.settings.retry_period(), from_date);

    tokio::select! {
        _ = poller.run() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            info!("received Ctrl-C, shutting down");
        }
    }

    Ok(())
}

async fn check(settings: &Settings, from_date: Option<i64>) -> Result<()> {
    let token = Credentials::practicum_token_from_lookup(|name| std::env::var(name).ok())?;
    let client = practicum_client(settings, token)?;
    let from_date =
        from_date.unwrap_or_else(|| settings.initial_from_date(Utc::now().timestamp()));

    println!("{}", check_report(&client, from_date).await?);
    Ok(())
}
