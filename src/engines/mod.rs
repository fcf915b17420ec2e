//! Search engine module
//!
//! Bing v7 API client. Web and news search are one client driven by a
//! variant profile.

mod error;
mod request;
mod retry;
mod traits;

pub mod bing;

pub use bing::BingSearch;
pub use error::SearchError;
pub use request::SearchRequest;
pub use retry::RetryPolicy;
pub use traits::*;
