//! Settings structures for Bing-Reader configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Bing v7 web search endpoint
pub const BING_TEXT_URL: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Bing v7 news search endpoint
pub const BING_NEWS_URL: &str = "https://api.bing.microsoft.com/v7.0/news/search";

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub reader: ReaderSettings,
    pub normalizer: NormalizerSettings,
    pub rewriter: RewriterSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the clients cannot use
    pub fn validate(&self) -> Result<()> {
        duration_secs(self.reader.timeout, "reader.timeout")?;
        duration_secs(self.rewriter.timeout, "rewriter.timeout")?;
        duration_secs(self.outgoing.request_timeout, "outgoing.request_timeout")?;
        Ok(())
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("BING_SUBSCRIPTION_KEY") {
            if !val.is_empty() {
                self.search.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("BING_READER_REWRITE") {
            self.rewriter.enabled = parse_flag(&val).unwrap_or(false);
        }
        if let Ok(val) = std::env::var("OLLAMA_BASE_URL") {
            self.rewriter.base_url = val;
        }
        if let Ok(val) = std::env::var("OLLAMA_MODEL") {
            self.rewriter.model = val;
        }
    }
}

/// Parse a boolean environment flag
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`, ignoring case.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Convert a timeout in seconds into a `Duration`
///
/// Zero, negative and non-finite values are errors.
pub fn duration_secs(secs: f64, field: &str) -> Result<Duration> {
    if secs <= 0.0 {
        return Err(anyhow!("{} must be positive, got {}", field, secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| anyhow!("{} is not a valid timeout: {}", field, e))
}

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`
    pub api_key: Option<String>,
    /// Web search endpoint
    pub text_url: String,
    /// News search endpoint
    pub news_url: String,
    /// Attempts per search call, first one included
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            text_url: BING_TEXT_URL.to_string(),
            news_url: BING_NEWS_URL.to_string(),
            max_attempts: 3,
            retry_delay_ms: 100,
        }
    }
}

/// Page reader settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Total timeout of a single page fetch in seconds
    pub timeout: f64,
    /// Charset used when the page does not declare one
    pub encoding: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            timeout: 10.0,
            encoding: "utf-8".to_string(),
        }
    }
}

/// Inclusive range of Unicode code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    pub start: u32,
    pub end: u32,
}

impl ScriptRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// CJK Unified Ideographs
    pub fn cjk() -> Self {
        Self::new(0x4E00, 0x9FFF)
    }
}

/// Text normalizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerSettings {
    /// Longest run of characters outside `script_ranges` that is kept
    pub min_foreign_run: usize,
    /// Lines with fewer trimmed characters are dropped
    pub min_line_len: usize,
    /// Code point ranges of the script to keep
    pub script_ranges: Vec<ScriptRange>,
    /// Wrap column of the HTML renderer
    pub render_width: usize,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            min_foreign_run: 20,
            min_line_len: 35,
            script_ranges: vec![ScriptRange::cjk()],
            render_width: 10_000,
        }
    }
}

/// Query rewriter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterSettings {
    /// Rewrite web queries through the model backend
    pub enabled: bool,
    /// Ollama model name
    pub model: String,
    /// Ollama base URL
    pub base_url: String,
    /// Completion timeout in seconds
    pub timeout: f64,
}

impl Default for RewriterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "qwen2.5:14b".to_string(),
            base_url: "http://localhost:11434".to_string(),
            timeout: 60.0,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// User agent string (none = random browser agent)
    pub useragent: Option<String>,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            useragent: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
