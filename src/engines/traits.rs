//! Engine request/response types and search variant profiles

use crate::config::SearchSettings;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// One raw result object returned by the provider
pub type Hit = Map<String, Value>;

/// HTTP request to be made against the provider
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters, in insertion order
    pub params: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Post)
    }

    fn with_method(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: Value) -> Self {
        self.body = Some(data);
        self
    }

    /// Look up a query parameter
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP response from an engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Which Bing vertical to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchVariant {
    /// Web pages, `webPages.value` envelope
    Web,
    /// News articles, top-level `value` envelope
    News,
}

impl SearchVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::News => "news",
        }
    }

    /// Build the execution profile for this variant
    pub fn profile(&self, settings: &SearchSettings) -> VariantProfile {
        match self {
            Self::Web => VariantProfile {
                endpoint: settings.text_url.clone(),
                envelope: &["webPages", "value"],
                renames: &[],
                rewrite_query: true,
            },
            Self::News => VariantProfile {
                endpoint: settings.news_url.clone(),
                envelope: &["value"],
                renames: &[("description", "snippet")],
                rewrite_query: false,
            },
        }
    }
}

impl fmt::Display for SearchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that differs between the search variants
#[derive(Debug, Clone)]
pub struct VariantProfile {
    /// Provider endpoint
    pub endpoint: String,
    /// Key path from the response root to the hit array
    pub envelope: &'static [&'static str],
    /// Field renames applied to every hit, `(from, to)`
    pub renames: &'static [(&'static str, &'static str)],
    /// Whether the query goes through the rewriter
    pub rewrite_query: bool,
}

impl VariantProfile {
    /// Pull the hit array out of a response body and apply field renames
    ///
    /// Returns a description of the problem when the body does not have the
    /// expected shape.
    pub fn extract_hits(&self, body: Value) -> Result<Vec<Hit>, String> {
        let mut node = body;
        for key in self.envelope {
            node = match node {
                Value::Object(mut map) => map
                    .remove(*key)
                    .ok_or_else(|| format!("missing key '{}'", self.envelope_path()))?,
                _ => return Err(format!("'{}' is not reachable", self.envelope_path())),
            };
        }

        let items = match node {
            Value::Array(items) => items,
            other => {
                return Err(format!(
                    "'{}' is {}, expected an array",
                    self.envelope_path(),
                    json_type(&other)
                ))
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(mut hit) => {
                    for (from, to) in self.renames {
                        if let Some(value) = hit.remove(*from) {
                            hit.insert((*to).to_string(), value);
                        }
                    }
                    Ok(hit)
                }
                other => Err(format!("hit {} is {}, expected an object", i, json_type(&other))),
            })
            .collect()
    }

    fn envelope_path(&self) -> String {
        self.envelope.join(".")
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_envelope() {
        let profile = SearchVariant::Web.profile(&SearchSettings::default());
        let body = json!({
            "_type": "SearchResponse",
            "webPages": { "value": [ { "name": "a", "snippet": "s" } ] }
        });
        let hits = profile.extract_hits(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["snippet"], "s");
    }

    #[test]
    fn test_news_envelope_renames_description() {
        let profile = SearchVariant::News.profile(&SearchSettings::default());
        let body = json!({ "value": [ { "name": "a", "description": "d" } ] });
        let hits = profile.extract_hits(body).unwrap();
        assert_eq!(hits[0]["snippet"], "d");
        assert!(!hits[0].contains_key("description"));
    }

    #[test]
    fn test_missing_envelope() {
        let profile = SearchVariant::Web.profile(&SearchSettings::default());
        let err = profile.extract_hits(json!({ "value": [] })).unwrap_err();
        assert!(err.contains("webPages.value"));
    }

    #[test]
    fn test_envelope_not_array() {
        let profile = SearchVariant::News.profile(&SearchSettings::default());
        let err = profile.extract_hits(json!({ "value": "oops" })).unwrap_err();
        assert!(err.contains("expected an array"));

        let err = profile.extract_hits(json!({ "value": [1] })).unwrap_err();
        assert!(err.contains("hit 0"));
    }

    #[test]
    fn test_empty_results_are_not_malformed() {
        let profile = SearchVariant::News.profile(&SearchSettings::default());
        assert!(profile.extract_hits(json!({ "value": [] })).unwrap().is_empty());
    }

    #[test]
    fn test_variant_flags() {
        let settings = SearchSettings::default();
        assert!(SearchVariant::Web.profile(&settings).rewrite_query);
        assert!(!SearchVariant::News.profile(&settings).rewrite_query);
        assert!(SearchVariant::News
            .profile(&settings)
            .endpoint
            .ends_with("/news/search"));
    }

    #[test]
    fn test_engine_request_params() {
        let request = EngineRequest::get("https://example.com")
            .param("q", "rust")
            .param("count", "10");
        assert_eq!(request.get_param("q"), Some("rust"));
        assert_eq!(request.get_param("mkt"), None);
        assert_eq!(request.method, HttpMethod::Get);
    }
}
