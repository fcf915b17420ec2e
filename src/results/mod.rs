//! Search records and hit normalization
//!
//! Raw provider hits are turned into typed `SearchRecord`s here; page
//! content is attached later by the pipeline.

mod hits;
mod types;

pub use hits::{normalize_hit, parse_date, post_process, NO_URL, UNNAMED};
pub use types::SearchRecord;
