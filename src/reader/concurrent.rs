//! Concurrent batch reader

use super::simple::SimplePageReader;
use super::traits::{IdentityProcessor, PageReader, ResultProcessor};
use crate::network::HttpClient;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Reads a batch of pages concurrently
///
/// Every URL gets its own fetch and all of them run at once on the calling
/// task; there is no cap on the fan-out, so very large batches open as many
/// connections as they have URLs. Results come back in input order.
pub struct ConcurrentReader {
    reader: Arc<dyn PageReader>,
    processor: Box<dyn ResultProcessor>,
}

impl ConcurrentReader {
    pub fn new(reader: Arc<dyn PageReader>) -> Self {
        Self {
            reader,
            processor: Box::new(IdentityProcessor),
        }
    }

    /// Post-process each finished batch
    pub fn with_processor(mut self, processor: impl ResultProcessor + 'static) -> Self {
        self.processor = Box::new(processor);
        self
    }

    /// Read every URL; output `i` belongs to `urls[i]`
    pub async fn read_all(&self, urls: &[String]) -> Vec<String> {
        info!("[ConcurrentReader] Retrieving contents from {:?}", urls);
        let start = Instant::now();

        let results = join_all(urls.iter().map(|url| self.reader.read(url))).await;
        let results = self.processor.process(results);

        info!(
            "[ConcurrentReader] Finished concurrent retrieving job in {:.2?}",
            start.elapsed()
        );
        results
    }
}

impl From<HttpClient> for ConcurrentReader {
    fn from(client: HttpClient) -> Self {
        Self::new(Arc::new(SimplePageReader::new(client)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SLOW: &str = "清华大学的前身清华学堂始建于1911年，1912年更名为清华学校，1928年更名为国立清华大学，校园坐落于北京西北郊";
    const FAST: &str = "北京大学创办于1898年，初名京师大学堂，是中国近现代第一所国立综合性大学，也是当时中国最高教育行政机关";

    /// Reader that echoes the URL after a delay derived from it
    struct EchoReader;

    #[async_trait]
    impl PageReader for EchoReader {
        fn name(&self) -> &str {
            "EchoReader"
        }

        async fn get(&self, url: &str) -> String {
            let delay = url.len() as u64 % 5 * 10;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            url.to_string()
        }

        fn transform(&self, raw: &str) -> String {
            raw.to_string()
        }
    }

    #[tokio::test]
    async fn test_order_and_length_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("<p>{}</p>", SLOW))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("<p>{}</p>", FAST)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/slow", server.uri()),
            "http://127.0.0.1:1/unreachable".to_string(),
            format!("{}/broken", server.uri()),
            format!("{}/fast", server.uri()),
            "No URL".to_string(),
        ];

        let reader = ConcurrentReader::from(HttpClient::new().unwrap());
        let contents = reader.read_all(&urls).await;

        assert_eq!(contents.len(), urls.len());
        assert_eq!(contents[0], SLOW);
        assert_eq!(contents[1], "");
        assert_eq!(contents[2], "");
        assert_eq!(contents[3], FAST);
        assert_eq!(contents[4], "");
    }

    #[tokio::test]
    async fn test_order_with_varied_completion_times() {
        let urls: Vec<String> = (0..20)
            .map(|i| format!("https://example.com/{}", "x".repeat(i)))
            .collect();
        let reader = ConcurrentReader::new(Arc::new(EchoReader));
        assert_eq!(reader.read_all(&urls).await, urls);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let reader = ConcurrentReader::new(Arc::new(EchoReader));
        assert!(reader.read_all(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_processor_hook() {
        let urls = vec!["a".to_string(), "bb".to_string()];
        let reader = ConcurrentReader::new(Arc::new(EchoReader))
            .with_processor(|results: Vec<String>| {
                results
                    .into_iter()
                    .map(|r| r.to_uppercase())
                    .collect::<Vec<_>>()
            });
        assert_eq!(reader.read_all(&urls).await, vec!["A", "BB"]);
    }
}
