//! Update handling and reply composition
//!
//! `Bot` routes one inbound message to the extractor, the store, and the
//! aggregation/chart code, and returns a [`Reply`] value. Sending the
//! reply is the poll loop's job; nothing in here touches the transport,
//! which keeps every flow testable against the in-memory store.

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, error};

use catat_core::store::{ExpenseStore, StoreClient};
use catat_core::{
    daily_total, render_category_chart, rolling_category_totals, scan_rows, Category,
    ExpenseRecord, Extractor,
};

/// Days covered by the /graph report, inclusive of both ends
const GRAPH_WINDOW_DAYS: i64 = 30;

/// An outbound reply, ready for the transport
#[derive(Debug)]
pub enum Reply {
    Text(String),
    Photo(Vec<u8>),
}

/// The bot orchestrator
pub struct Bot {
    extractor: Extractor,
    store: StoreClient,
}

impl Bot {
    pub fn new(extractor: Extractor, store: StoreClient) -> Self {
        Self { extractor, store }
    }

    /// Handle one inbound message and produce the reply
    pub async fn handle(&self, text: &str) -> Reply {
        let text = text.trim();
        // Commands may arrive as "/report@BotName" in group chats
        let command = text
            .split_whitespace()
            .next()
            .map(|w| w.split('@').next().unwrap_or(w))
            .unwrap_or("");

        match command {
            "/start" => Reply::Text(welcome_text()),
            "/report" => self.report().await,
            "/graph" => self.graph().await,
            c if c.starts_with('/') => Reply::Text(format!(
                "Unknown command {}. Try /start, /report or /graph.",
                c
            )),
            _ => self.log_expense(text).await,
        }
    }

    async fn log_expense(&self, text: &str) -> Reply {
        let Some(parsed) = self.extractor.extract(text) else {
            debug!("parse miss, replying with format help");
            return Reply::Text(format!(
                "Sorry, I couldn't parse that. Please follow this format:\n{}",
                format_help()
            ));
        };

        let today = today();
        let record = ExpenseRecord::new(today, parsed.amount, parsed.category, parsed.description);
        if let Err(e) = self.store.append(&record).await {
            error!(error = %e, "failed to append expense to the store");
            return Reply::Text(
                "Sorry, I couldn't save that right now. Please try again later.".to_string(),
            );
        }

        Reply::Text(format!(
            "Added {} to {} with description '{}' on {}.",
            record.amount, record.category, record.description, record.date
        ))
    }

    async fn report(&self) -> Reply {
        let rows = match self.store.read_all().await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "failed to read the store");
                return Reply::Text(
                    "Sorry, I couldn't read the expense log right now. Please try again later."
                        .to_string(),
                );
            }
        };

        let scan = scan_rows(&rows);
        let today = today();
        let total = daily_total(&scan.records, today);

        let mut reply = format!("Total spending for {}: {}.", today, total);
        if scan.skipped > 0 {
            reply.push_str(&format!("\n(Skipped {} malformed rows.)", scan.skipped));
        }
        Reply::Text(reply)
    }

    async fn graph(&self) -> Reply {
        let rows = match self.store.read_all().await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "failed to read the store");
                return Reply::Text(
                    "Sorry, I couldn't read the expense log right now. Please try again later."
                        .to_string(),
                );
            }
        };

        let scan = scan_rows(&rows);
        let today = today();
        let totals = rolling_category_totals(&scan.records, today, GRAPH_WINDOW_DAYS);
        if totals.is_empty() {
            return Reply::Text("No spending data for the last 30 days.".to_string());
        }

        // Stable display order
        let mut categories = Vec::new();
        let mut amounts = Vec::new();
        for category in Category::all() {
            if let Some(&amount) = totals.get(category) {
                categories.push(category.as_str().to_string());
                amounts.push(amount);
            }
        }

        let start = today - Duration::days(GRAPH_WINDOW_DAYS);
        let title = format!(
            "Spending by Category (Last 30 Days: {} to {})",
            start, today
        );
        match render_category_chart(&categories, &amounts, &title) {
            Ok(png) => Reply::Photo(png),
            Err(e) => {
                error!(error = %e, "failed to render chart");
                Reply::Text(
                    "Sorry, I couldn't render the chart right now. Please try again later."
                        .to_string(),
                )
            }
        }
    }
}

/// The server's local date; records are stamped with this at creation
fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn format_help() -> String {
    let categories = Category::all()
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Specific format examples:\n\
         - English: 'I spent 50 on Makanan [description]' (e.g., 'I spent 50 on Makanan groceries')\n\
         - Indonesian: 'Beli 20 ribu pada Makanan [description]' (e.g., 'Beli 20 ribu pada Makanan ayam krispi')\n\
         Categories: {}.\n\
         - <amount>: Number (e.g., 50, 20.5). Add 'ribu' for thousands (e.g., 20 ribu = 20,000).\n\
         - [description]: Optional details.",
        categories
    )
}

fn welcome_text() -> String {
    format!(
        "Hi! I'm Catat, your expense tracker. {}\n\
         Use /report for today's total or /graph for a 30-day spending chart.",
        format_help()
    )
}
