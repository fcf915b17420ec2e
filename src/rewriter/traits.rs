//! Rewriter and completion backend traits

use async_trait::async_trait;

/// Rewrites a query before it is sent to the provider
#[async_trait]
pub trait QueryRewriter: Send + Sync {
    /// Rewriter name, for logs
    fn name(&self) -> &str;

    /// Rewrite the query; never fails, returns the input when it cannot help
    async fn rewrite(&self, query: &str) -> String;
}

/// Text completion service used by model-backed rewriters
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &str;

    /// Complete a single prompt
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Rewriter that leaves the query alone
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRewriter;

#[async_trait]
impl QueryRewriter for IdentityRewriter {
    fn name(&self) -> &str {
        "identity"
    }

    async fn rewrite(&self, query: &str) -> String {
        query.to_string()
    }
}
