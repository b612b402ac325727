//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Shortlife - short links with click budgets and expiry
#[derive(Parser, Debug)]
#[command(name = "shortlife")]
#[command(version)]
#[command(about = "An in-memory URL shortener with click budgets and TTL expiry", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml in the working directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Interactive shell against an in-process store
    Repl,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
