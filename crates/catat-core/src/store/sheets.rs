//! Google Sheets store backend
//!
//! Talks to the Sheets values API: one `:append` call per expense and a
//! range read for reporting. The sheet is expected to carry a header row
//! (Date, Amount, Category, Description); everything below it is data.
//!
//! Authentication is a pre-issued bearer token (`SHEETS_ACCESS_TOKEN`);
//! token issuance and refresh live outside this process.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, RawRow};

use super::ExpenseStore;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
const DEFAULT_RANGE: &str = "Sheet1!A:D";

/// Google Sheets store
#[derive(Clone)]
pub struct SheetsStore {
    http_client: Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
    range: String,
}

impl SheetsStore {
    /// Create a new Sheets store
    ///
    /// `base_url` is explicit so tests can point the client at a mock
    /// server.
    pub fn new(base_url: &str, spreadsheet_id: &str, token: &str, range: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
            range: range.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let spreadsheet_id = std::env::var("SPREADSHEET_ID").ok()?;
        let token = std::env::var("SHEETS_ACCESS_TOKEN").ok()?;
        let base_url =
            std::env::var("SHEETS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let range = std::env::var("SHEETS_RANGE").unwrap_or_else(|_| DEFAULT_RANGE.to_string());
        Some(Self::new(&base_url, &spreadsheet_id, &token, &range))
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, self.range
        )
    }
}

/// Body of a values append request
#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

/// A value range as returned by the values API
///
/// `values` is absent entirely when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

fn cells_to_row(cells: &[String]) -> RawRow {
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
    RawRow {
        date: cell(0),
        amount: cell(1),
        category: cell(2),
        description: cell(3),
    }
}

#[async_trait]
impl ExpenseStore for SheetsStore {
    async fn append(&self, record: &ExpenseRecord) -> Result<()> {
        let row = RawRow::from_record(record);
        let request = AppendRequest {
            values: vec![vec![row.date, row.amount, row.category, row.description]],
        };

        let response = self
            .http_client
            .post(format!("{}:append", self.values_url()))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!("append failed: {} {}", status, body)));
        }

        debug!(spreadsheet = %self.spreadsheet_id, "appended expense row");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<RawRow>> {
        let response = self
            .http_client
            .get(self.values_url())
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!("read failed: {} {}", status, body)));
        }

        let range: ValueRange = response.json().await?;
        debug!(rows = range.values.len(), "read sheet values");

        let mut rows = range.values.as_slice();
        // First row is the header when present
        if let Some(first) = rows.first() {
            if first
                .first()
                .is_some_and(|c| c.eq_ignore_ascii_case("date"))
            {
                rows = &rows[1..];
            }
        }

        Ok(rows.iter().map(|cells| cells_to_row(cells)).collect())
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(self.values_url())
            .bearer_auth(&self.token)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn name(&self) -> &'static str {
        "sheets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_to_row_pads_missing_cells() {
        let row = cells_to_row(&["2024-01-01".to_string(), "10".to_string()]);
        assert_eq!(row.date, "2024-01-01");
        assert_eq!(row.amount, "10");
        assert_eq!(row.category, "");
        assert_eq!(row.description, "");
    }

    #[test]
    fn test_values_url_shape() {
        let store = SheetsStore::new("http://localhost:9999/", "sheet123", "tok", "Sheet1!A:D");
        assert_eq!(
            store.values_url(),
            "http://localhost:9999/v4/spreadsheets/sheet123/values/Sheet1!A:D"
        );
    }
}
