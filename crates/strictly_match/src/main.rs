//! Strictly Match - terminal tic-tac-toe championship.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use console::{Console, RULES};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_tictactoe::MatchConfig;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args),
        Command::Rules => {
            println!("{}", RULES);
            Ok(())
        }
    }
}

/// Merges config file and flags, then runs the console session.
#[instrument(skip(args))]
fn run_play(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    debug!(?config, "Resolved match config");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(interactive = !args.yes, "Starting console session");
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    console.run(config, !args.yes, &mut rng)
}

/// Layers command-line flags over the config file (or the defaults).
fn build_config(args: &PlayArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => MatchConfig::default(),
    };

    if let Some(opponent) = args.opponent {
        config = config.with_opponent(opponent);
    }
    if let Some(max_wins) = args.max_wins {
        config = config.with_max_wins(max_wins);
    }
    if let Some(marker) = &args.marker {
        config = config.with_human_marker(marker.clone());
    }
    if let Some(marker) = &args.computer_marker {
        config = config.with_computer_marker(marker.clone());
    }
    if let Some(first) = args.first {
        config = config.with_first_mover(first);
    }

    config.validate().context("Invalid match settings")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::{FirstMover, Opponent};

    #[test]
    fn test_flags_override_defaults() {
        let args = PlayArgs {
            opponent: Some(Opponent::C3P0),
            max_wins: Some(2),
            marker: Some("@".to_string()),
            first: Some(FirstMover::Computer),
            ..PlayArgs::default()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(*config.opponent(), Opponent::C3P0);
        assert_eq!(*config.max_wins(), 2);
        assert_eq!(config.human_marker(), "@");
        assert_eq!(*config.first_mover(), FirstMover::Computer);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = PlayArgs {
            max_wins: Some(42),
            ..PlayArgs::default()
        };
        assert!(build_config(&args).is_err());

        let args = PlayArgs {
            marker: Some("T".to_string()),
            ..PlayArgs::default()
        };
        assert!(build_config(&args).is_err());
    }
}
