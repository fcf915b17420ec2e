//! Ollama completion backend

use super::traits::CompletionBackend;
use crate::config::{duration_secs, RewriterSettings};
use crate::network::HttpClient;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Completion backend speaking Ollama's `/api/generate`
pub struct OllamaBackend {
    client: HttpClient,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaBackend {
    pub fn new(client: HttpClient, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_settings(settings: &RewriterSettings, client: HttpClient) -> anyhow::Result<Self> {
        let timeout = duration_secs(settings.timeout, "rewriter.timeout")?;
        Ok(Self::new(client, &settings.base_url, &settings.model).with_timeout(timeout))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false
        });

        let response = self
            .client
            .post_json(&self.endpoint(), payload, self.timeout)
            .await?;

        if !response.is_success() {
            anyhow::bail!("Ollama error ({}): {}", response.status, response.text);
        }

        let body: serde_json::Value = response.json()?;
        body.get("response")
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Ollama response missing text: {}", body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({ "model": "qwen2.5:7b", "stream": false })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": " 柯南 基德 " })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let backend = OllamaBackend::new(HttpClient::new().unwrap(), server.uri(), "qwen2.5:7b");
        assert_eq!(backend.complete("prompt").await.unwrap(), " 柯南 基德 ");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let backend = OllamaBackend::new(HttpClient::new().unwrap(), server.uri(), "missing");
        let err = backend.complete("prompt").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_missing_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
            .mount(&server)
            .await;

        let backend = OllamaBackend::new(HttpClient::new().unwrap(), server.uri(), "m");
        assert!(backend.complete("prompt").await.is_err());
    }

    #[tokio::test]
    async fn test_endpoint_trailing_slash() {
        let backend = OllamaBackend::new(HttpClient::new().unwrap(), "http://localhost:11434/", "m");
        assert_eq!(backend.endpoint(), "http://localhost:11434/api/generate");
    }
}
