//! Bing-Reader command line entry point
//!
//! Builds a Chinese-market request from the arguments, runs the pipeline and
//! prints the records as JSON on stdout.

use anyhow::Result;
use bing_reader::{
    config, engines::BingSearch, network::HttpClient, rewriter, ResearchPipeline, SearchRequest,
    SearchVariant,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bing-reader", version, about = "Search Bing and read the result pages")]
struct Cli {
    /// Search query
    query: String,

    /// Search news instead of web pages
    #[arg(long)]
    news: bool,

    /// Print raw provider hits and skip page reading
    #[arg(long)]
    raw: bool,

    /// Rewrite the query with the configured language model
    #[arg(long)]
    rewrite: bool,

    /// Number of results to request
    #[arg(long, default_value_t = 10)]
    count: u32,

    /// Path to settings.yml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting Bing-Reader v{}", bing_reader::VERSION);

    let mut settings = config::load(cli.config.as_deref())?;
    if cli.rewrite {
        settings.rewriter.enabled = true;
    }

    let variant = if cli.news {
        SearchVariant::News
    } else {
        SearchVariant::Web
    };
    let request = SearchRequest::chinese(cli.query, cli.count);

    let output = if cli.raw {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let mut search = BingSearch::new(variant, client.clone(), &settings.search);
        if let Some(rewriter) = rewriter::from_settings(&settings.rewriter, client)? {
            search = search.with_rewriter(rewriter);
        }
        let hits = search.search(&request).await?;
        serde_json::to_string_pretty(&hits)?
    } else {
        let pipeline = ResearchPipeline::from_settings(&settings, variant)?;
        let records = pipeline.run(&request).await?;
        serde_json::to_string_pretty(&records)?
    };

    println!("{}", output);
    Ok(())
}
