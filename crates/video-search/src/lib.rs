//! # video-search
//!
//! Queries the Bilibili web search API for videos matching a keyword and returns the top
//! three hits with HTML highlight tags stripped from their titles.
//!
//! Not hardened: network errors and unexpected response shapes are returned as errors.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.bilibili.com";
const SEARCH_PATH: &str = "/x/web-interface/search/type";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36";
// The endpoint rejects cookie-less requests.
const BUVID3_COOKIE: &str = "buvid3=FEBA361F-08F9-00C9-0191-698CE0023B3136553infoc";
const MAX_HITS: usize = 3;

/// One search result: cleaned title and video page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHit {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: SearchData,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    result: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    title: String,
    arcurl: String,
}

/// Removes `<...>` tags (the API wraps matched keywords in `<em class="keyword">`).
pub fn strip_tags(s: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"));
    tag.replace_all(s, "").into_owned()
}

/// HTTP client for the search endpoint.
#[derive(Clone)]
pub struct VideoSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl VideoSearchClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Uses a different API host (tests point this at a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns up to three hits for `keyword`, in the order the API ranks them.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str) -> Result<Vec<VideoHit>> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("page", "1"),
                ("order", "default"),
                ("keyword", keyword),
                ("search_type", "video"),
            ])
            .header(reqwest::header::COOKIE, BUVID3_COOKIE)
            .send()
            .await
            .context("Video search request failed")?
            .error_for_status()
            .context("Video search returned an error status")?;

        let body: SearchResponse = response
            .json()
            .await
            .context("Unexpected video search response")?;

        let hits: Vec<VideoHit> = body
            .data
            .result
            .into_iter()
            .take(MAX_HITS)
            .map(|raw| VideoHit {
                title: strip_tags(&raw.title),
                url: raw.arcurl,
            })
            .collect();
        debug!(count = hits.len(), "Video search done");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_removes_highlight_markup() {
        assert_eq!(
            strip_tags(r#"<em class="keyword">Rust</em> in 100 seconds"#),
            "Rust in 100 seconds"
        );
        assert_eq!(strip_tags("plain title"), "plain title");
        assert_eq!(strip_tags("a <b>bold</b> <i>move</i>"), "a bold move");
    }
}
