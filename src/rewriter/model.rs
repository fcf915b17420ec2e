//! Model-backed query rewriter

use super::traits::{CompletionBackend, QueryRewriter};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

const REWRITE_TEMPLATE: &str = "Rewrite the query, make it more suitable for search engine.
Make the intent of the query more clear. add necessary components to the query.
If the query depends on time, anchor it to the current date.
Do not include any explanation, just output the rewritten query.
The output language should be the same as the input language.

Current date:{date}
Input query:{query}
Rewritten query:";

/// Format the rewrite instruction for a query
pub fn rewrite_prompt(query: &str, today: NaiveDate) -> String {
    REWRITE_TEMPLATE
        .replace("{date}", &today.format("%Y-%m-%d").to_string())
        .replace("{query}", query)
}

/// Rewriter that asks a language model for a search-friendly query
///
/// A small model is enough and keeps the search latency down.
pub struct ModelRewriter<B> {
    backend: B,
}

impl<B: CompletionBackend> ModelRewriter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    async fn try_rewrite(&self, query: &str) -> anyhow::Result<String> {
        let prompt = rewrite_prompt(query, Local::now().date_naive());
        let completion = self.backend.complete(&prompt).await?;
        let rewritten = completion.trim();
        if rewritten.is_empty() {
            anyhow::bail!("empty completion");
        }
        Ok(rewritten.to_string())
    }
}

#[async_trait]
impl<B: CompletionBackend> QueryRewriter for ModelRewriter<B> {
    fn name(&self) -> &str {
        "model"
    }

    async fn rewrite(&self, query: &str) -> String {
        match self.try_rewrite(query).await {
            Ok(rewritten) => {
                info!("Rewrote query '{}' as '{}'", query, rewritten);
                rewritten
            }
            Err(e) => {
                warn!(
                    "Rewriting query '{}' with {} failed, keeping it: {}",
                    query,
                    self.backend.name(),
                    e
                );
                query.to_string()
            }
        }
    }
}
