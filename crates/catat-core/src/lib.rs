//! Catat Core Library
//!
//! Shared functionality for the Catat expense-logging bot:
//! - Message-to-record extraction (amount, category, description)
//! - Data-driven category normalization table
//! - Aggregation for daily totals and rolling category reports
//! - Pluggable expense store backends (Google Sheets, in-memory)
//! - Category chart rendering to PNG bytes

pub mod categories;
pub mod chart;
pub mod error;
pub mod extract;
pub mod models;
pub mod report;
pub mod store;

/// Test utilities including mock Sheets server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use categories::CategoryTable;
pub use chart::render_category_chart;
pub use error::{Error, Result};
pub use extract::{Extractor, ParsedExpense};
pub use models::{Category, ExpenseRecord, RawRow};
pub use report::{daily_total, rolling_category_totals, scan_rows, RowScan};
pub use store::{ExpenseStore, MemoryStore, SheetsStore, StoreClient};
