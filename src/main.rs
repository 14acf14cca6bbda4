// ABOUTME: Main entry point for squash-match
//
// Binary: squash-match
// Usage: squash-match <COMMAND>
// - onboard: create a profile through the onboarding flow
// - offer-game: offer a game to anyone or to a named partner
// - invite: accept or decline an invite link
// - availability: preview a weekly grid and its matching times
// - config: show or initialise the config file

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use squash_match::cli::{self, Commands};
use squash_match::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = AppConfig::load()?;
    tracing::debug!("Loaded config version {}", config.version);

    match args.command {
        Commands::Onboard(onboard_args) => {
            cli::onboard::execute(onboard_args, args.format, &config).await
        }
        Commands::OfferGame(offer_args) => {
            cli::offer::execute(offer_args, args.format, &config).await
        }
        Commands::Invite(invite_args) => {
            cli::invite::execute(invite_args, args.format, &config).await
        }
        Commands::Availability(availability_args) => {
            cli::availability::execute(availability_args, args.format, &config).await
        }
        Commands::Config(config_args) => {
            cli::config::execute(config_args, args.format, &config).await
        }
    }
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "squash_match=info".into())
    };

    // JSONL file under ~/.squash-match/logs, stderr when that is not writable
    let file = AppConfig::data_dir().ok().and_then(|dir| {
        let log_dir = dir.join("logs");
        std::fs::create_dir_all(&log_dir).ok()?;
        let log_file = log_dir.join(format!(
            "squash-match-{}.jsonl",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));
        OpenOptions::new().create(true).append(true).open(log_file).ok()
    });

    match file {
        Some(file) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(file)
                    .with_ansi(false),
            )
            .with(filter())
            .init(),
        None => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter())
            .init(),
    }
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
