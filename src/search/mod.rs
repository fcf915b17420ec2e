//! Search orchestration module
//!
//! Runs the whole research flow: search, normalize hits, read every
//! result page concurrently and attach the page text to its record.

mod pipeline;

pub use pipeline::ResearchPipeline;
