//! Bing v7 query parameters

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for the Bing v7 search APIs
///
/// Only `q` is required. Absent fields are left out of the request so the
/// provider applies its own defaults. Field names follow the provider's
/// camelCase spelling on the wire. See
/// <https://learn.microsoft.com/en-us/bing/search-apis/bing-web-search/reference/query-parameters>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// The user's search query
    pub q: String,
    /// Number of answers the response should include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_count: Option<u32>,
    /// 2-character country code the results come from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    /// Number of results to return (provider default 10, max 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Age filter: Day, Week, Month, or a `YYYY-MM-DD..YYYY-MM-DD` range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,
    /// Market the results come from, e.g. `zh-CN`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mkt: Option<String>,
    /// Number of results to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Comma-separated answers to include regardless of ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promote: Option<String>,
    /// Comma-separated answers to include in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_filter: Option<String>,
    /// Adult content filter: Off, Moderate, Strict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_search: Option<String>,
    /// Language of user interface strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_lang: Option<String>,
    /// Whether display strings carry hit highlighting markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decorations: Option<bool>,
    /// Marker format for decorations: Raw or HTML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,
}

impl SearchRequest {
    /// Create a request with only the query set
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            answer_count: None,
            cc: None,
            count: None,
            freshness: None,
            mkt: None,
            offset: None,
            promote: None,
            response_filter: None,
            safe_search: None,
            set_lang: None,
            text_decorations: None,
            text_format: None,
        }
    }

    /// Preset for Chinese-language searches with HTML hit highlighting
    pub fn chinese(q: impl Into<String>, count: u32) -> Self {
        Self::new(q)
            .with_text_decorations(true)
            .with_text_format("HTML")
            .with_cc("zh-CN")
            .with_mkt("zh-CN")
            .with_count(count)
    }

    pub fn with_answer_count(mut self, answer_count: u32) -> Self {
        self.answer_count = Some(answer_count);
        self
    }

    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_freshness(mut self, freshness: impl Into<String>) -> Self {
        self.freshness = Some(freshness.into());
        self
    }

    pub fn with_mkt(mut self, mkt: impl Into<String>) -> Self {
        self.mkt = Some(mkt.into());
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_promote(mut self, promote: impl Into<String>) -> Self {
        self.promote = Some(promote.into());
        self
    }

    pub fn with_response_filter(mut self, filter: impl Into<String>) -> Self {
        self.response_filter = Some(filter.into());
        self
    }

    pub fn with_safe_search(mut self, level: impl Into<String>) -> Self {
        self.safe_search = Some(level.into());
        self
    }

    pub fn with_set_lang(mut self, lang: impl Into<String>) -> Self {
        self.set_lang = Some(lang.into());
        self
    }

    pub fn with_text_decorations(mut self, enabled: bool) -> Self {
        self.text_decorations = Some(enabled);
        self
    }

    pub fn with_text_format(mut self, format: impl Into<String>) -> Self {
        self.text_format = Some(format.into());
        self
    }

    /// Flatten into query parameters, omitting absent fields
    pub fn to_params(&self) -> Vec<(String, String)> {
        let value = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => return vec![("q".to_string(), self.q.clone())],
        };

        value
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_minimal_request_only_sends_query() {
        let params = SearchRequest::new("rust").to_params();
        assert_eq!(params, vec![("q".to_string(), "rust".to_string())]);
    }

    #[test]
    fn test_chinese_preset() {
        let params = SearchRequest::chinese("柯南和基德的关系是？", 10).to_params();
        assert_eq!(lookup(&params, "q"), Some("柯南和基德的关系是？"));
        assert_eq!(lookup(&params, "textDecorations"), Some("true"));
        assert_eq!(lookup(&params, "textFormat"), Some("HTML"));
        assert_eq!(lookup(&params, "cc"), Some("zh-CN"));
        assert_eq!(lookup(&params, "mkt"), Some("zh-CN"));
        assert_eq!(lookup(&params, "count"), Some("10"));
        assert_eq!(lookup(&params, "offset"), None);
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn test_camel_case_names() {
        let params = SearchRequest::new("q")
            .with_answer_count(2)
            .with_response_filter("Webpages,News")
            .with_safe_search("Strict")
            .with_set_lang("EN")
            .with_freshness("2019-02-01..2019-05-30")
            .to_params();
        assert_eq!(lookup(&params, "answerCount"), Some("2"));
        assert_eq!(lookup(&params, "responseFilter"), Some("Webpages,News"));
        assert_eq!(lookup(&params, "safeSearch"), Some("Strict"));
        assert_eq!(lookup(&params, "setLang"), Some("EN"));
        assert_eq!(lookup(&params, "freshness"), Some("2019-02-01..2019-05-30"));
    }
}
