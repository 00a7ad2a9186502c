//! Command-line interface for strictly_2048.

use clap::{Parser, Subcommand};

/// Strictly 2048 - slide tiles, merge equal numbers, reach 2048
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "Terminal 2048 built on a pure rule engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "strictly_2048.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Seed for tile spawns (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play headless games with a fixed move priority and print results
    Autoplay {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Seed for tile spawns (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Stop a game after this many moves
        #[arg(long, default_value = "100000")]
        max_moves: usize,
    },
}
