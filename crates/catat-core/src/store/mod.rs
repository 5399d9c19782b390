//! Pluggable expense store abstraction
//!
//! The store is an external append-only tabular collaborator: append one
//! row per expense, read all rows back for reporting. The core never
//! retries a failed store call; retry policy belongs to the caller.
//!
//! - `ExpenseStore` trait: the interface the orchestrator consumes
//! - `StoreClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `SheetsStore` (Google Sheets values API),
//!   `MemoryStore` (in-memory fake for tests and local development)

mod memory;
mod sheets;

pub use memory::MemoryStore;
pub use sheets::SheetsStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ExpenseRecord, RawRow};

/// Trait defining the interface for expense stores
///
/// Implementations should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Append one record to the store
    async fn append(&self, record: &ExpenseRecord) -> Result<()>;

    /// Read all stored rows (header excluded), oldest first
    async fn read_all(&self) -> Result<Vec<RawRow>>;

    /// Check if the store is reachable
    async fn health_check(&self) -> bool;

    /// Backend name (for logging and the status command)
    fn name(&self) -> &'static str;
}

/// Concrete store client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum StoreClient {
    /// Google Sheets values API over HTTP
    Sheets(SheetsStore),
    /// In-memory fake for tests and local development
    Memory(MemoryStore),
}

impl StoreClient {
    /// Create a store client from environment variables
    ///
    /// `STORE_BACKEND` selects the backend:
    /// - `sheets` (default): uses SPREADSHEET_ID, SHEETS_ACCESS_TOKEN and
    ///   optionally SHEETS_RANGE
    /// - `memory`: volatile in-process store, nothing persisted
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "sheets".to_string());

        match backend.to_lowercase().as_str() {
            "sheets" => SheetsStore::from_env().map(StoreClient::Sheets),
            "memory" => Some(StoreClient::Memory(MemoryStore::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown STORE_BACKEND, falling back to sheets");
                SheetsStore::from_env().map(StoreClient::Sheets)
            }
        }
    }

    /// Create an in-memory store directly
    pub fn memory() -> Self {
        StoreClient::Memory(MemoryStore::new())
    }
}

#[async_trait]
impl ExpenseStore for StoreClient {
    async fn append(&self, record: &ExpenseRecord) -> Result<()> {
        match self {
            StoreClient::Sheets(s) => s.append(record).await,
            StoreClient::Memory(s) => s.append(record).await,
        }
    }

    async fn read_all(&self) -> Result<Vec<RawRow>> {
        match self {
            StoreClient::Sheets(s) => s.read_all().await,
            StoreClient::Memory(s) => s.read_all().await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            StoreClient::Sheets(s) => s.health_check().await,
            StoreClient::Memory(s) => s.health_check().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StoreClient::Sheets(s) => s.name(),
            StoreClient::Memory(s) => s.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_client_name() {
        let client = StoreClient::memory();
        assert_eq!(client.name(), "memory");
    }

    #[tokio::test]
    async fn test_memory_client_health_check() {
        let client = StoreClient::memory();
        assert!(client.health_check().await);
    }
}
