//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};

/// Catat - Log expenses from chat messages into a spreadsheet
#[derive(Parser)]
#[command(name = "catat")]
#[command(about = "Telegram expense-logging bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the bot (long-polls Telegram for updates)
    Run {
        /// Long-poll timeout in seconds
        #[arg(long, default_value = "30")]
        poll_timeout: u64,
    },

    /// Run the extractor on one message and print the result
    Parse {
        /// The message text to parse
        message: String,
    },

    /// Check that the store and the Telegram API are reachable
    Status,
}
