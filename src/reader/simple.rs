//! HTTP page reader

use super::traits::PageReader;
use crate::config::{duration_secs, ReaderSettings};
use crate::network::HttpClient;
use crate::text::Normalizer;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Reader that fetches a page with one GET request
pub struct SimplePageReader {
    client: HttpClient,
    timeout: Duration,
    encoding: String,
    normalizer: Arc<Normalizer>,
}

impl SimplePageReader {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(10),
            encoding: "utf-8".to_string(),
            normalizer: Arc::new(Normalizer::default()),
        }
    }

    pub fn with_settings(client: HttpClient, settings: &ReaderSettings) -> anyhow::Result<Self> {
        Ok(Self {
            timeout: duration_secs(settings.timeout, "reader.timeout")?,
            encoding: settings.encoding.clone(),
            ..Self::new(client)
        })
    }

    /// Normalizer used by `transform`
    pub fn with_normalizer(mut self, normalizer: Arc<Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    async fn try_get(&self, url: &str) -> anyhow::Result<String> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("unsupported scheme '{}'", parsed.scheme());
        }

        self.client
            .fetch_text(parsed.as_str(), self.timeout, &self.encoding)
            .await
    }
}

#[async_trait]
impl PageReader for SimplePageReader {
    fn name(&self) -> &str {
        "SimplePageReader"
    }

    async fn get(&self, url: &str) -> String {
        match self.try_get(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("[{}] Error retrieving from {}: {}", self.name(), url, e);
                String::new()
            }
        }
    }

    fn transform(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LINE: &str = "北京大学创办于1898年，初名京师大学堂，是中国近现代第一所国立综合性大学，也是当时中国最高教育行政机关";

    fn page() -> String {
        format!(
            "<html><head><title>关于北大</title></head><body><nav>Home | About | Contact</nav><p>{}</p></body></html>",
            LINE
        )
    }

    fn reader(timeout: f64) -> SimplePageReader {
        let settings = ReaderSettings {
            timeout,
            ..Default::default()
        };
        SimplePageReader::with_settings(HttpClient::new().unwrap(), &settings).unwrap()
    }

    #[tokio::test]
    async fn test_read_normalizes_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/about.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page()))
            .mount(&server)
            .await;

        let text = reader(5.0)
            .read(&format!("{}/about.html", server.uri()))
            .await;
        assert_eq!(text, LINE);
    }

    #[tokio::test]
    async fn test_error_status_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(page()))
            .mount(&server)
            .await;

        assert_eq!(reader(5.0).read(&format!("{}/x", server.uri())).await, "");
    }

    #[tokio::test]
    async fn test_timeout_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        assert_eq!(reader(0.2).read(&format!("{}/slow", server.uri())).await, "");
    }

    #[tokio::test]
    async fn test_unreachable_and_invalid_urls_yield_empty() {
        let reader = reader(2.0);
        assert_eq!(reader.read("http://127.0.0.1:1/").await, "");
        assert_eq!(reader.read("No URL").await, "");
        assert_eq!(reader.read("ftp://example.com/file").await, "");
    }

    #[tokio::test]
    async fn test_negative_timeout_rejected() {
        let settings = ReaderSettings {
            timeout: -5.0,
            ..Default::default()
        };
        assert!(SimplePageReader::with_settings(HttpClient::new().unwrap(), &settings).is_err());
    }
}
