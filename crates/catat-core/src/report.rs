//! Aggregation over stored expense records
//!
//! Pure reductions used by the `/report` and `/graph` replies. Stored rows
//! are validated loosely first ([`scan_rows`]): a malformed row is skipped
//! and counted, never aborts the whole aggregation, since partial or legacy
//! data must not crash reporting.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::warn;

use crate::models::{Category, ExpenseRecord, RawRow};

/// Result of validating a batch of stored rows
#[derive(Debug, Clone, Default)]
pub struct RowScan {
    pub records: Vec<ExpenseRecord>,
    /// Rows dropped because the date or amount didn't parse
    pub skipped: usize,
}

/// Validate stored rows, skipping (and counting) malformed ones
pub fn scan_rows(rows: &[RawRow]) -> RowScan {
    let mut scan = RowScan::default();
    for row in rows {
        match ExpenseRecord::from_row(row) {
            Ok(record) => scan.records.push(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed stored row");
                scan.skipped += 1;
            }
        }
    }
    scan
}

/// Sum of amounts for records dated exactly `date`
pub fn daily_total(records: &[ExpenseRecord], date: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|r| r.date == date)
        .map(|r| r.amount)
        .sum()
}

/// Per-category totals over the inclusive window `[end - window_days, end]`
///
/// Categories with no activity in the window are absent from the map; an
/// empty map is the "no data" state the caller must distinguish from a
/// zero-valued entry.
pub fn rolling_category_totals(
    records: &[ExpenseRecord],
    end: NaiveDate,
    window_days: i64,
) -> HashMap<Category, f64> {
    let start = end - Duration::days(window_days);
    let mut totals = HashMap::new();
    for record in records {
        if record.date >= start && record.date <= end {
            *totals.entry(record.category).or_insert(0.0) += record.amount;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(d: &str, amount: f64, category: Category) -> ExpenseRecord {
        ExpenseRecord::new(date(d), amount, category, String::new())
    }

    #[test]
    fn test_daily_total_empty() {
        assert_eq!(daily_total(&[], date("2024-01-01")), 0.0);
    }

    #[test]
    fn test_daily_total_exact_date_only() {
        let records = vec![
            record("2024-01-01", 10.0, Category::Makanan),
            record("2024-01-01", 5.0, Category::Minuman),
            record("2024-01-02", 100.0, Category::Makanan),
        ];
        assert_eq!(daily_total(&records, date("2024-01-01")), 15.0);
        assert_eq!(daily_total(&records, date("2024-01-02")), 100.0);
        assert_eq!(daily_total(&records, date("2024-01-03")), 0.0);
    }

    #[test]
    fn test_rolling_totals_groups_by_category() {
        let records = vec![
            record("2024-01-10", 10.0, Category::Makanan),
            record("2024-01-20", 20.0, Category::Makanan),
            record("2024-01-25", 5.0, Category::Minuman),
        ];
        let totals = rolling_category_totals(&records, date("2024-01-31"), 30);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&Category::Makanan], 30.0);
        assert_eq!(totals[&Category::Minuman], 5.0);
        assert!(!totals.contains_key(&Category::Hiburan));
    }

    #[test]
    fn test_rolling_totals_window_is_inclusive() {
        let end = date("2024-01-31");
        let records = vec![
            // exactly 30 days before end: included
            record("2024-01-01", 1.0, Category::Makanan),
            // one day earlier: excluded
            record("2023-12-31", 2.0, Category::Makanan),
            // the end date itself: included
            record("2024-01-31", 4.0, Category::Makanan),
            // after the end date: excluded
            record("2024-02-01", 8.0, Category::Makanan),
        ];
        let totals = rolling_category_totals(&records, end, 30);
        assert_eq!(totals[&Category::Makanan], 5.0);
    }

    #[test]
    fn test_rolling_totals_empty_is_distinguishable() {
        let records = vec![record("2020-01-01", 10.0, Category::Makanan)];
        let totals = rolling_category_totals(&records, date("2024-01-31"), 30);
        assert!(totals.is_empty());
    }

    #[test]
    fn test_rolling_totals_order_independent() {
        let mut records = vec![
            record("2024-01-10", 10.0, Category::Makanan),
            record("2024-01-20", 20.0, Category::Minuman),
            record("2024-01-25", 5.0, Category::Makanan),
        ];
        let forward = rolling_category_totals(&records, date("2024-01-31"), 30);
        records.reverse();
        let backward = rolling_category_totals(&records, date("2024-01-31"), 30);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_scan_rows_skips_malformed() {
        let rows = vec![
            RawRow {
                date: "2024-01-01".to_string(),
                amount: "10".to_string(),
                category: "Makanan".to_string(),
                description: String::new(),
            },
            RawRow {
                date: "not-a-date".to_string(),
                amount: "10".to_string(),
                category: "Makanan".to_string(),
                description: String::new(),
            },
            RawRow {
                date: "2024-01-02".to_string(),
                amount: "lots".to_string(),
                category: "Makanan".to_string(),
                description: String::new(),
            },
        ];
        let scan = scan_rows(&rows);
        assert_eq!(scan.records.len(), 1);
        assert_eq!(scan.skipped, 2);
    }

    #[test]
    fn test_scan_rows_empty() {
        let scan = scan_rows(&[]);
        assert!(scan.records.is_empty());
        assert_eq!(scan.skipped, 0);
    }
}
