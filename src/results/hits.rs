//! Post-processing of raw provider hits

use super::types::SearchRecord;
use crate::engines::Hit;
use crate::text::{strip_tags, Normalizer};
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

/// Title used when a hit has no `name`
pub const UNNAMED: &str = "Unnamed";

/// URL used when a hit has no `url`
pub const NO_URL: &str = "No URL";

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Turn raw hits into records
pub fn post_process(hits: &[Hit], normalizer: &Normalizer) -> Vec<SearchRecord> {
    hits.iter().map(|hit| normalize_hit(hit, normalizer)).collect()
}

/// Turn a single raw hit into a record
pub fn normalize_hit(hit: &Hit, normalizer: &Normalizer) -> SearchRecord {
    let title = string_field(hit, "name")
        .map(strip_tags)
        .unwrap_or_else(|| UNNAMED.to_string());

    let date = string_field(hit, "datePublished")
        .map(parse_date)
        .unwrap_or_default();

    let url = string_field(hit, "url")
        .map(str::to_string)
        .unwrap_or_else(|| NO_URL.to_string());

    let snippet = normalizer.normalize(string_field(hit, "snippet").unwrap_or_default());

    SearchRecord::new(title, date, url, snippet)
}

/// Parse a provider timestamp, ignoring fractional seconds and zone suffix
///
/// Falls back to the Unix epoch when the timestamp cannot be read.
pub fn parse_date(raw: &str) -> NaiveDateTime {
    let head: String = raw.chars().take(19).collect();
    match NaiveDateTime::parse_from_str(&head, DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            debug!("Unreadable datePublished '{}': {}", raw, e);
            NaiveDateTime::default()
        }
    }
}

fn string_field<'a>(hit: &'a Hit, key: &str) -> Option<&'a str> {
    match hit.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}
