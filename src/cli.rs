//! Command line interface.
//!
//! With no subcommand the bot runs the poll loop; `check` does a single
//! request and prints the latest verdict without touching Telegram.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Relays Practicum homework review status changes to a Telegram chat.
#[derive(Debug, Parser)]
#[command(name = "homework-bot", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Settings file with non-secret tunables.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Seconds between poll cycles, overrides the settings file.
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub retry_period: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Poll the API and notify the chat about status changes (default).
    Run,

    /// Fetch once and print the latest verdict to stdout.
    Check {
        /// Unix timestamp to look back to (defaults to now minus lookback).
        #[arg(long)]
        from_date: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::parse_from(["homework-bot"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_check_with_from_date() {
        let cli = Cli::parse_from(["homework-bot", "check", "--from-date", "1700000000"]);
        match cli.command {
            Some(Command::Check { from_date }) => assert_eq!(from_date, Some(1_700_000_000)),
            other => panic!("expected Check command, got {other:?}"),
        }
    }

    #[test]
    fn parses_global_flags() {
        let cli = Cli::parse_from([
            "homework-bot",
            "--config",
            "/etc/homework_bot.toml",
            "--retry-period",
            "60",
            "-v",
            "run",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.retry_period, Some(60));
        assert_eq!(cli.config, PathBuf::from("/etc/homework_bot.toml"));
        assert!(matches!(cli.command, Some(Command::Run)));
    }

    #[test]
    fn zero_retry_period_is_rejected() {
        assert!(Cli::try_parse_from(["homework-bot", "--retry-period", "0"]).is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
