//! Page reader traits

use async_trait::async_trait;
use std::time::Instant;
use tracing::info;

/// Reads the text content of one page
#[async_trait]
pub trait PageReader: Send + Sync {
    /// Reader name, for logs
    fn name(&self) -> &str;

    /// Fetch the raw page; returns an empty string on any failure
    async fn get(&self, url: &str) -> String;

    /// Clean the raw page
    fn transform(&self, raw: &str) -> String {
        crate::text::normalize(raw)
    }

    /// Fetch and clean a page, logging how long it took
    async fn read(&self, url: &str) -> String {
        info!("[{}] Start retrieving content from {}", self.name(), url);
        let start = Instant::now();

        let raw = self.get(url).await;
        let result = self.transform(&raw);

        info!(
            "[{}] Finished retrieving content from {} in {:.2?}",
            self.name(),
            url,
            start.elapsed()
        );
        result
    }
}

/// Post-processing applied to a whole batch of page texts
pub trait ResultProcessor: Send + Sync {
    fn process(&self, results: Vec<String>) -> Vec<String>;
}

/// Processor that returns the batch unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProcessor;

impl ResultProcessor for IdentityProcessor {
    fn process(&self, results: Vec<String>) -> Vec<String> {
        results
    }
}

impl<F> ResultProcessor for F
where
    F: Fn(Vec<String>) -> Vec<String> + Send + Sync,
{
    fn process(&self, results: Vec<String>) -> Vec<String> {
        self(results)
    }
}
