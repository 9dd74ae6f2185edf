//! Price history record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One extracted price point for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Date from which the price applies.
    pub effective_date: NaiveDate,

    /// Cleaned product description.
    pub description: String,

    /// Basic price in whole currency units.
    pub price: u64,
}

impl PriceRecord {
    /// Create a new record.
    pub fn new(effective_date: NaiveDate, description: impl Into<String>, price: u64) -> Self {
        Self {
            effective_date,
            description: description.into(),
            price,
        }
    }

    /// Key used to suppress repeated records within one extraction run.
    ///
    /// Two records with the same effective date and the same description
    /// (compared case-insensitively) are considered the same entry.
    pub fn dedupe_key(&self) -> String {
        format!("{}|{}", self.effective_date, self.description.to_lowercase())
    }
}
