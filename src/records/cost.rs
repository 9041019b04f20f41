use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A cost entry imported from the bookkeeping sheet. Read-only input to the
/// reports engine; dates arrive as free text and may be malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub category: String,
    pub amount: f64,
    pub date: String,
    /// Free text, "paid" or "pending" by convention.
    #[serde(default)]
    pub status: String,
}

impl CostRecord {
    /// Parses the recorded date. Malformed dates yield `None` and the record
    /// is excluded from period aggregation rather than defaulted to today.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn is_paid(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("paid")
    }
}
