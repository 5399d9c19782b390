//! Expense message extractor
//!
//! Parses one line of free text into an amount, a canonical category, and
//! an optional description. Two sentence shapes are accepted, illustrated
//! by "I spent 50 on Makanan groceries" (English) and "Beli 20 ribu pada
//! Makanan ayam krispi" (Indonesian). Anything else is a parse miss, which
//! is an expected outcome, not an error; the caller replies with format
//! help.
//!
//! The regex strategy is an implementation detail of this module; callers
//! only see the [`Extractor::extract`] contract.

use regex::Regex;
use tracing::debug;

use crate::categories::CategoryTable;
use crate::error::Result;
use crate::models::Category;

/// Sentence shape: optional lead-in ("spent" / "beli saya"), a numeric
/// quantity, an optional "ribu" unit marker after the number, an optional
/// connective ("on" / "pada"), one category word, and the rest of the line
/// as description.
const MESSAGE_PATTERN: &str =
    r"(?:spent|beli\s+saya)?\s*(\d+(?:\.\d+)?)(?:\s+ribu)?\s+(?:on|pada)?\s*(\w+)(?:\s+(.*))?";

/// A successfully extracted expense, not yet date-stamped
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    /// Numeric value with the "ribu" multiplier already applied
    pub amount: f64,
    pub category: Category,
    /// Trailing free text; empty when the message had none
    pub description: String,
}

/// Pattern-based expense extractor
///
/// Stateless per call; safe to share across concurrent callers.
pub struct Extractor {
    pattern: Regex,
    table: CategoryTable,
}

impl Extractor {
    pub fn new(table: CategoryTable) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(MESSAGE_PATTERN)?,
            table,
        })
    }

    /// Extract an expense from one message
    ///
    /// Returns `None` when the message doesn't match either known shape.
    ///
    /// The "ribu" (thousand) multiplier is a substring check over the whole
    /// lower-cased message, not the matched group, so "ribu" appearing only
    /// inside the description still multiplies the amount by 1000. Known
    /// latent quirk, kept for compatibility with historical data; see the
    /// regression test before changing it.
    pub fn extract(&self, message: &str) -> Option<ParsedExpense> {
        let lower = message.to_lowercase();
        let captures = match self.pattern.captures(&lower) {
            Some(c) => c,
            None => {
                debug!(message = %message, "no expense shape matched");
                return None;
            }
        };

        let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
        let amount = if lower.contains("ribu") {
            amount * 1000.0
        } else {
            amount
        };

        let token = captures.get(2)?.as_str();
        let category = self.table.normalize(token);
        let description = captures
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        debug!(amount, %category, description = %description, "extracted expense");
        Some(ParsedExpense {
            amount,
            category,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        let table = CategoryTable::load(None).unwrap();
        Extractor::new(table).unwrap()
    }

    #[test]
    fn test_english_shape_with_description() {
        let parsed = extractor()
            .extract("I spent 50 on Makanan groceries")
            .unwrap();
        assert_eq!(parsed.amount, 50.0);
        assert_eq!(parsed.category, Category::Makanan);
        assert_eq!(parsed.description, "groceries");
    }

    #[test]
    fn test_indonesian_shape_with_ribu() {
        let parsed = extractor()
            .extract("Beli 20 ribu pada Makanan ayam krispi")
            .unwrap();
        assert_eq!(parsed.amount, 20000.0);
        assert_eq!(parsed.category, Category::Makanan);
        assert_eq!(parsed.description, "ayam krispi");
    }

    #[test]
    fn test_gibberish_is_a_miss() {
        assert!(extractor().extract("gibberish").is_none());
        assert!(extractor().extract("").is_none());
        assert!(extractor().extract("what did I spend today?").is_none());
    }

    #[test]
    fn test_synonym_category_no_description() {
        let parsed = extractor().extract("spent 15 on kopi").unwrap();
        assert_eq!(parsed.amount, 15.0);
        assert_eq!(parsed.category, Category::Minuman);
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn test_decimal_amount() {
        let parsed = extractor().extract("spent 20.5 on food").unwrap();
        assert_eq!(parsed.amount, 20.5);
        assert_eq!(parsed.category, Category::Makanan);
    }

    #[test]
    fn test_bare_amount_and_category() {
        let parsed = extractor().extract("50 makanan").unwrap();
        assert_eq!(parsed.amount, 50.0);
        assert_eq!(parsed.category, Category::Makanan);
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn test_unknown_category_token_falls_back() {
        let parsed = extractor().extract("spent 30 on groceries").unwrap();
        assert_eq!(parsed.category, Category::LainLain);
    }

    #[test]
    fn test_case_insensitive() {
        let parsed = extractor().extract("SPENT 10 ON KOPI es batu").unwrap();
        assert_eq!(parsed.amount, 10.0);
        assert_eq!(parsed.category, Category::Minuman);
        assert_eq!(parsed.description, "es batu");
    }

    // Regression: the multiplier check scans the whole message, so "ribu"
    // appearing only in the description still multiplies by 1000. Current
    // behavior, do not "fix" silently.
    #[test]
    fn test_ribu_in_description_still_multiplies() {
        let parsed = extractor()
            .extract("spent 5 on makanan nasi goreng seharga lima ribu")
            .unwrap();
        assert_eq!(parsed.amount, 5000.0);
        assert_eq!(parsed.description, "nasi goreng seharga lima ribu");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let ex = extractor();
        let first = ex.extract("spent 15 on kopi");
        let second = ex.extract("spent 15 on kopi");
        assert_eq!(first, second);
    }
}
