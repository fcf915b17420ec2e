//! Search-then-read pipeline

use crate::config::Settings;
use crate::engines::{BingSearch, SearchError, SearchRequest, SearchVariant};
use crate::network::HttpClient;
use crate::reader::{ConcurrentReader, SimplePageReader};
use crate::results::SearchRecord;
use crate::rewriter;
use crate::text::Normalizer;
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// Search, then fetch and attach the content of every result page
pub struct ResearchPipeline {
    search: BingSearch,
    reader: ConcurrentReader,
}

impl ResearchPipeline {
    pub fn new(search: BingSearch, reader: ConcurrentReader) -> Self {
        Self { search, reader }
    }

    /// Wire up a pipeline for a variant from settings
    pub fn from_settings(settings: &Settings, variant: SearchVariant) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let normalizer = Arc::new(
            Normalizer::new(&settings.normalizer).context("Invalid normalizer script ranges")?,
        );

        let mut search = BingSearch::new(variant, client.clone(), &settings.search)
            .with_normalizer(normalizer.clone());
        if let Some(rewriter) = rewriter::from_settings(&settings.rewriter, client.clone())? {
            search = search.with_rewriter(rewriter);
        }

        let page_reader =
            SimplePageReader::with_settings(client, &settings.reader)?.with_normalizer(normalizer);
        let reader = ConcurrentReader::new(Arc::new(page_reader));

        Ok(Self::new(search, reader))
    }

    /// The underlying search client
    pub fn search(&self) -> &BingSearch {
        &self.search
    }

    /// Run the pipeline for one request
    pub async fn run(&self, request: &SearchRequest) -> Result<Vec<SearchRecord>, SearchError> {
        let span = info_span!("pipeline", query = %request.q, variant = %self.search.variant());

        async move {
            let mut records = self.search.search_normalize(request).await?;
            self.enrich(&mut records).await;
            info!(
                "Pipeline finished with {} records, {} with content",
                records.len(),
                records.iter().filter(|r| r.has_content()).count()
            );
            Ok(records)
        }
        .instrument(span)
        .await
    }

    /// Fetch the page behind every record and attach its text
    pub async fn enrich(&self, records: &mut [SearchRecord]) {
        let urls: Vec<String> = records.iter().map(|r| r.url.clone()).collect();
        let contents = self.reader.read_all(&urls).await;

        if contents.len() != records.len() {
            warn!(
                "Reader returned {} contents for {} records",
                contents.len(),
                records.len()
            );
        }

        for (record, content) in records.iter_mut().zip(contents) {
            record.set_content(content);
        }
    }
}
