//! HTTP client for search API calls and page fetches

use super::user_agent::{accept_html, accept_json, generate_user_agent};
use crate::config::{duration_secs, OutgoingSettings};
use crate::engines::{EngineRequest, EngineResponse, HttpMethod};
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper with Bing-Reader specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let request_timeout = duration_secs(settings.request_timeout, "outgoing.request_timeout")?;
        let mut builder = Client::builder()
            .timeout(request_timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: request_timeout,
            user_agent: settings
                .useragent
                .clone()
                .unwrap_or_else(generate_user_agent),
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Execute an API request
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute an API request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: EngineRequest,
        timeout: Duration,
    ) -> Result<EngineResponse> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = self
            .with_default_headers(req_builder, accept_json())
            .timeout(timeout);

        // Add custom headers
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        // Add query parameters
        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        // Add body
        if let Some(json) = request.body {
            req_builder = req_builder.json(&json);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Fetch a page as text
    ///
    /// Fails on transport errors, on a non-2xx status and when the body
    /// cannot be read. `encoding` applies when the response declares no charset.
    pub async fn fetch_text(&self, url: &str, timeout: Duration, encoding: &str) -> Result<String> {
        let req_builder = self
            .with_default_headers(self.client.get(url), accept_html())
            .timeout(timeout);

        let response = req_builder.send().await?.error_for_status()?;
        let text = response.text_with_charset(encoding).await?;
        Ok(text)
    }

    /// POST with JSON body
    pub async fn post_json(
        &self,
        url: &str,
        json: serde_json::Value,
        timeout: Duration,
    ) -> Result<EngineResponse> {
        let request = EngineRequest::post(url).json(json);
        self.execute_with_timeout(request, timeout).await
    }

    fn with_default_headers(&self, mut req_builder: RequestBuilder, accept: &str) -> RequestBuilder {
        req_builder = req_builder
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept)
            .header("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8");

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        req_builder
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response) -> Result<EngineResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(EngineResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
