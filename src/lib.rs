//! Bing-Reader: search the web and read the result pages
//!
//! A small research pipeline. A query is optionally rewritten by a language
//! model, sent to the Bing v7 search API, the hits are normalized into
//! [`SearchRecord`]s and the page behind every hit is fetched concurrently
//! and cleaned into plain text.

pub mod config;
pub mod engines;
pub mod network;
pub mod reader;
pub mod results;
pub mod rewriter;
pub mod search;
pub mod text;

pub use config::Settings;
pub use engines::{BingSearch, SearchError, SearchRequest, SearchVariant};
pub use reader::{ConcurrentReader, PageReader, SimplePageReader};
pub use results::SearchRecord;
pub use rewriter::QueryRewriter;
pub use search::ResearchPipeline;
pub use text::{normalize, Normalizer};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
