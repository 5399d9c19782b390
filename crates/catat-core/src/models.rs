//! Domain models for Catat

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used everywhere a date crosses the store boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical expense categories
///
/// This is the closed set of categories the bot ever persists or reports.
/// `LainLain` ("Lain-lain", miscellaneous) is the mandatory fallback for
/// anything the normalization table doesn't recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Makanan,
    Minuman,
    #[serde(rename = "Belanja Online")]
    BelanjaOnline,
    Transportasi,
    Hiburan,
    Tagihan,
    #[serde(rename = "Lain-lain")]
    LainLain,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Makanan => "Makanan",
            Self::Minuman => "Minuman",
            Self::BelanjaOnline => "Belanja Online",
            Self::Transportasi => "Transportasi",
            Self::Hiburan => "Hiburan",
            Self::Tagihan => "Tagihan",
            Self::LainLain => "Lain-lain",
        }
    }

    /// All categories, in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Makanan,
            Self::Minuman,
            Self::BelanjaOnline,
            Self::Transportasi,
            Self::Hiburan,
            Self::Tagihan,
            Self::LainLain,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "makanan" => Ok(Self::Makanan),
            "minuman" => Ok(Self::Minuman),
            "belanja online" => Ok(Self::BelanjaOnline),
            "transportasi" => Ok(Self::Transportasi),
            "hiburan" => Ok(Self::Hiburan),
            "tagihan" => Ok(Self::Tagihan),
            "lain-lain" => Ok(Self::LainLain),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted expense
///
/// Created exactly once, at successful parse of an inbound message, and
/// appended to the store. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    /// Non-negative, unit-less, with any "ribu" multiplier already applied
    pub amount: f64,
    pub category: Category,
    pub description: String,
}

impl ExpenseRecord {
    pub fn new(date: NaiveDate, amount: f64, category: Category, description: String) -> Self {
        Self {
            date,
            amount,
            category,
            description,
        }
    }

    /// Convert a loosely-typed stored row into a record
    ///
    /// The store hands back untyped text cells; `date` must parse as
    /// `YYYY-MM-DD` and `amount` as a number or the row is rejected. An
    /// unrecognized category cell falls back to `LainLain` rather than
    /// rejecting the row, so legacy data stays summable.
    pub fn from_row(row: &RawRow) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| Error::InvalidData(format!("bad date {:?}: {}", row.date, e)))?;
        let amount: f64 = row
            .amount
            .trim()
            .parse()
            .map_err(|e| Error::InvalidData(format!("bad amount {:?}: {}", row.amount, e)))?;
        let category = row.category.parse().unwrap_or(Category::LainLain);

        Ok(Self {
            date,
            amount,
            category,
            description: row.description.clone(),
        })
    }
}

/// A raw row as read back from the store
///
/// Fields are untyped text from an external source; see
/// [`ExpenseRecord::from_row`] for the validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl RawRow {
    /// The header row the sheet is expected to start with
    pub fn header() -> Self {
        Self {
            date: "Date".to_string(),
            amount: "Amount".to_string(),
            category: "Category".to_string(),
            description: "Description".to_string(),
        }
    }

    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            amount: record.amount.to_string(),
            category: record.category.as_str().to_string(),
            description: record.description.clone(),
        }
    }
}
