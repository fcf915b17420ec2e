//! HTTP networking module
//!
//! Provides the HTTP client shared by the search client, the page readers
//! and the completion backend.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::generate_user_agent;
