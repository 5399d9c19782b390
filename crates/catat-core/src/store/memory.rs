//! In-memory store for tests and local development
//!
//! Holds rows in a process-local Vec. Nothing survives a restart; useful
//! for handler tests and for running the bot without a spreadsheet
//! (`STORE_BACKEND=memory`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, RawRow};

use super::ExpenseStore;

/// In-memory expense store
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<RawRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with rows
    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn append(&self, record: &ExpenseRecord) -> Result<()> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| Error::Store("row lock poisoned".to_string()))?;
        rows.push(RawRow::from_record(record));
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<RawRow>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| Error::Store("row lock poisoned".to_string()))?;
        Ok(rows.clone())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
