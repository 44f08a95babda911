//! Normalization of raw breach records.

use crate::model::{BreachEntry, BreachRecord};

const UNKNOWN_DATE: &str = "Unknown";
const UNSPECIFIED_DATA: &str = "Not specified";

/// Drops unnamed records and fills in missing dates and data classes.
#[must_use]
pub fn normalize_breaches(records: Vec<BreachRecord>) -> Vec<BreachEntry> {
    records
        .into_iter()
        .filter_map(|record| {
            let name = record.name.filter(|n| !n.trim().is_empty())?;
            let date = record
                .breach_date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_DATE.to_string());
            let data_exposed = record
                .data_classes
                .filter(|classes| !classes.is_empty())
                .map_or_else(|| UNSPECIFIED_DATA.to_string(), |classes| classes.join(", "));
            Some(BreachEntry { name, date, data_exposed })
        })
        .collect()
}
