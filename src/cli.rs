//! Command-line interface for strictly_arcade.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Arcade - mini-game session server
#[derive(Parser, Debug)]
#[command(name = "strictly_arcade")]
#[command(about = "HTTP server for tic-tac-toe, number guess, hangman and rock-paper-scissors")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file (optional; defaults apply if missing)
        #[arg(long, default_value = "arcade.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
