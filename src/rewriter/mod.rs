//! Query rewriting
//!
//! Rewriters turn a user query into something a search engine handles
//! better. Rewriting is best effort: every rewriter returns a query, falling
//! back to the input when its backend fails.

mod model;
mod ollama;
mod traits;

pub use model::{rewrite_prompt, ModelRewriter};
pub use ollama::OllamaBackend;
pub use traits::{CompletionBackend, IdentityRewriter, QueryRewriter};

use crate::config::RewriterSettings;
use crate::network::HttpClient;
use std::sync::Arc;

/// Build the rewriter described by the settings, if enabled
pub fn from_settings(
    settings: &RewriterSettings,
    client: HttpClient,
) -> anyhow::Result<Option<Arc<dyn QueryRewriter>>> {
    if !settings.enabled {
        return Ok(None);
    }

    let backend = OllamaBackend::from_settings(settings, client)?;
    Ok(Some(Arc::new(ModelRewriter::new(backend))))
}
