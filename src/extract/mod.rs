use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::parse::RawRecord;

/// Identifier scheme for valid sensor rows: the 6 digits after `log_` are
/// the device model code used as the grouping key downstream.
static MODEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"log_(\d{6})").unwrap());

/// A record whose grouping key has been derived. Consumed once by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Always exactly 6 decimal digits.
    pub model: String,
    pub timestamp: String,
    pub temperature: f64,
    pub direction: String,
}

/// Outcome of an extraction pass. Non-matching rows are a filtering
/// decision, not an error; the count makes the drops observable.
#[derive(Debug)]
pub struct Extraction {
    pub records: Vec<NormalizedRecord>,
    pub dropped: usize,
}

/// Pull the 6-digit model code out of a source identifier, if present.
pub fn model_code(id: &str) -> Option<&str> {
    MODEL_RE
        .captures(id)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Derive the grouping key for each record; rows whose id does not carry a
/// model code are dropped. Output order matches input order with drops
/// removed; no deduplication (the aggregation views group later).
pub fn extract(records: Vec<RawRecord>) -> Extraction {
    let input = records.len();
    let normalized: Vec<NormalizedRecord> = records
        .into_iter()
        .filter_map(|r| {
            model_code(&r.id).map(|model| NormalizedRecord {
                model: model.to_string(),
                timestamp: r.timestamp,
                temperature: r.temperature,
                direction: r.direction,
            })
        })
        .collect();

    let dropped = input - normalized.len();
    debug!(kept = normalized.len(), dropped, "extracted model codes");

    Extraction {
        records: normalized,
        dropped,
    }
}
