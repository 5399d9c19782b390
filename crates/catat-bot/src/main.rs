//! Catat bot - Telegram expense logger
//!
//! Usage:
//!   catat run                  Start the bot (long-polls Telegram)
//!   catat parse "spent 15 on kopi"   Try the extractor on one message
//!   catat status               Check store and Telegram connectivity

mod cli;
mod commands;
mod handlers;
mod telegram;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Run { poll_timeout } => commands::cmd_run(poll_timeout).await,
        Commands::Parse { message } => commands::cmd_parse(&message),
        Commands::Status => commands::cmd_status().await,
    }
}
