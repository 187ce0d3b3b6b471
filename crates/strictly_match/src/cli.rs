//! Command-line interface for strictly_match.

use clap::{Args, Parser, Subcommand};
use strictly_tictactoe::{FirstMover, Opponent};

/// Strictly Match - tic-tac-toe championship against the computer
#[derive(Parser, Debug)]
#[command(name = "strictly_match")]
#[command(about = "Play tic-tac-toe rounds against a computer opponent until someone is champion", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a championship in the terminal
    Play(PlayArgs),

    /// Print the rules and exit
    Rules,
}

/// Options for a championship. Anything left unset falls back to the
/// config file, then to the built-in defaults; the setup prompts offer
/// each value as the default answer.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML match config
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Computer opponent: r2d2 (easy), c3p0 (medium) or terminator (hard)
    #[arg(short, long)]
    pub opponent: Option<Opponent>,

    /// Round wins needed to become champion (1-10)
    #[arg(short, long)]
    pub max_wins: Option<u32>,

    /// Your single-character marker
    #[arg(long)]
    pub marker: Option<String>,

    /// The computer's single-character marker
    #[arg(long)]
    pub computer_marker: Option<String>,

    /// Who opens the first round: human, computer or random
    #[arg(short, long)]
    pub first: Option<FirstMover>,

    /// Seed for the computer's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the setup prompts and play with the configured values
    #[arg(short, long)]
    pub yes: bool,
}
