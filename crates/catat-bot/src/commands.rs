//! Command implementations dispatched from main

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use catat_core::store::{ExpenseStore, StoreClient};
use catat_core::{CategoryTable, Extractor};

use crate::handlers::{Bot, Reply};
use crate::telegram::TelegramClient;

/// Build the extractor from the configured category table
pub fn build_extractor() -> Result<Extractor> {
    let table = CategoryTable::load(None).context("Failed to load the category table")?;
    Extractor::new(table).context("Failed to compile the message pattern")
}

/// Build the store client from the environment
pub fn build_store() -> Result<StoreClient> {
    StoreClient::from_env().context(
        "Store configuration missing: set SPREADSHEET_ID and SHEETS_ACCESS_TOKEN, \
         or STORE_BACKEND=memory for a volatile local store",
    )
}

/// Build the Telegram client from the environment
pub fn build_telegram() -> Result<TelegramClient> {
    TelegramClient::from_env().context("TELEGRAM_TOKEN not set")
}

/// Long-poll Telegram and handle updates until the process is stopped
pub async fn cmd_run(poll_timeout: u64) -> Result<()> {
    let bot = Bot::new(build_extractor()?, build_store()?);
    let telegram = build_telegram()?;

    info!(poll_timeout, "starting Telegram long-poll loop");
    let mut offset: Option<i64> = None;

    loop {
        let updates = match telegram.get_updates(offset, poll_timeout).await {
            Ok(updates) => updates,
            Err(e) => {
                error!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text.as_deref() else {
                continue;
            };

            let reply = bot.handle(text).await;
            let sent = match reply {
                Reply::Text(text) => telegram.send_message(message.chat.id, &text).await,
                Reply::Photo(png) => telegram.send_photo(message.chat.id, png).await,
            };
            if let Err(e) = sent {
                error!(error = %e, chat_id = message.chat.id, "failed to send reply");
            }
        }
    }
}

/// Run the extractor on one message and print the outcome
pub fn cmd_parse(message: &str) -> Result<()> {
    let extractor = build_extractor()?;
    match extractor.extract(message) {
        Some(parsed) => {
            println!("amount:      {}", parsed.amount);
            println!("category:    {}", parsed.category);
            println!("description: '{}'", parsed.description);
        }
        None => {
            println!("No expense shape matched.");
        }
    }
    Ok(())
}

/// Probe the store and the Telegram API
pub async fn cmd_status() -> Result<()> {
    let store = build_store()?;
    let store_ok = store.health_check().await;
    println!(
        "Store ({}): {}",
        store.name(),
        if store_ok { "ok" } else { "unreachable" }
    );

    let telegram = build_telegram()?;
    let telegram_ok = telegram.health_check().await;
    println!(
        "Telegram API: {}",
        if telegram_ok { "ok" } else { "unreachable" }
    );

    Ok(())
}
