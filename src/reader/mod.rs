//! Page readers
//!
//! Fetch result pages and turn them into normalized text. A single fetch
//! never fails: problems are logged and yield an empty string, so one bad
//! URL cannot take a whole batch down.

mod concurrent;
mod simple;
mod traits;

pub use concurrent::ConcurrentReader;
pub use simple::SimplePageReader;
pub use traits::{IdentityProcessor, PageReader, ResultProcessor};
