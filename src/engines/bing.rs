//! Bing v7 API search client

use super::error::SearchError;
use super::request::SearchRequest;
use super::retry::RetryPolicy;
use super::traits::*;
use crate::config::SearchSettings;
use crate::network::HttpClient;
use crate::results::{post_process, SearchRecord};
use crate::rewriter::QueryRewriter;
use crate::text::Normalizer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Header carrying the Bing subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Search client for one Bing vertical
///
/// Web and news search share this type; the [`SearchVariant`] profile
/// decides the endpoint, the response envelope and the field renames.
pub struct BingSearch {
    client: HttpClient,
    variant: SearchVariant,
    profile: VariantProfile,
    api_key: Option<String>,
    retry: RetryPolicy,
    rewriter: Option<Arc<dyn QueryRewriter>>,
    normalizer: Arc<Normalizer>,
}

impl BingSearch {
    /// Create a client for a variant
    pub fn new(variant: SearchVariant, client: HttpClient, settings: &SearchSettings) -> Self {
        if settings.api_key.is_none() {
            warn!("No Bing subscription key configured, set BING_SUBSCRIPTION_KEY");
        }

        Self {
            client,
            variant,
            profile: variant.profile(settings),
            api_key: settings.api_key.clone(),
            retry: RetryPolicy::new(
                settings.max_attempts,
                Duration::from_millis(settings.retry_delay_ms),
            ),
            rewriter: None,
            normalizer: Arc::new(Normalizer::default()),
        }
    }

    /// Web search client
    pub fn text(client: HttpClient, settings: &SearchSettings) -> Self {
        Self::new(SearchVariant::Web, client, settings)
    }

    /// News search client
    pub fn news(client: HttpClient, settings: &SearchSettings) -> Self {
        Self::new(SearchVariant::News, client, settings)
    }

    /// Rewrite queries before searching (web variant only)
    pub fn with_rewriter(mut self, rewriter: Arc<dyn QueryRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Normalizer applied to snippets
    pub fn with_normalizer(mut self, normalizer: Arc<Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Override the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn variant(&self) -> SearchVariant {
        self.variant
    }

    /// Query text that will be sent for a request
    pub async fn effective_query(&self, q: &str) -> String {
        match (&self.rewriter, self.profile.rewrite_query) {
            (Some(rewriter), true) => rewriter.rewrite(q).await,
            _ => q.to_string(),
        }
    }

    /// Build the provider request
    pub fn build_request(&self, req: &SearchRequest, query: &str) -> EngineRequest {
        let mut request = EngineRequest::get(&self.profile.endpoint);
        for (key, value) in req.to_params() {
            let value = if key == "q" { query.to_string() } else { value };
            request = request.param(key, value);
        }

        if let Some(ref key) = self.api_key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        request
    }

    /// Search and return the raw hits
    pub async fn search(&self, req: &SearchRequest) -> Result<Vec<Hit>, SearchError> {
        let query = self.effective_query(&req.q).await;
        info!("Calling bing {} api on query '{}'", self.variant, query);

        let request = self.build_request(req, &query);
        let label = format!("bing {} search", self.variant);

        let response = self
            .retry
            .run(&label, |_| {
                let request = request.clone();
                async move {
                    let response = self.client.execute(request).await?;
                    if !response.is_success() {
                        anyhow::bail!("HTTP error: {}", response.status);
                    }
                    Ok(response)
                }
            })
            .await
            .map_err(|source| SearchError::Transient {
                variant: self.variant,
                attempts: self.retry.max_attempts,
                source,
            })?;

        let hits = self.parse(&response)?;
        debug!("Bing {} search returned {} hits", self.variant, hits.len());
        Ok(hits)
    }

    /// Search and return normalized records
    pub async fn search_normalize(&self, req: &SearchRequest) -> Result<Vec<SearchRecord>, SearchError> {
        let hits = self.search(req).await?;
        Ok(post_process(&hits, &self.normalizer))
    }

    fn parse(&self, response: &EngineResponse) -> Result<Vec<Hit>, SearchError> {
        let malformed = |reason: String| SearchError::MalformedResponse {
            variant: self.variant,
            reason,
        };

        let body: serde_json::Value = response
            .json()
            .map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

        self.profile.extract_hits(body).map_err(malformed)
    }
}
