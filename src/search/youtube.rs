//! YouTube Data API v3 search backend.

use super::{clamp_limit, Candidate, CandidateSource};
use crate::config::Settings;
use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default search endpoint.
pub const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Default timeout for the search request.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Search backend for the YouTube Data API.
pub struct YoutubeSearch {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl YoutubeSearch {
    /// Create a search client with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, SEARCH_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a search client with a custom endpoint and timeout.
    pub fn with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(VidseekError::Auth("YouTube API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VidseekError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: endpoint.into(),
        })
    }

    /// Build a search client from settings. Fails with `Auth` when no key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?;
        Self::with_config(
            api_key,
            settings.youtube.search_url.clone(),
            Duration::from_secs(settings.youtube.timeout_seconds),
        )
    }
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches various YouTube URL formats and bare video IDs
        Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    })
}

/// Extract a video ID from a YouTube URL or a bare 11-character ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let caps = video_id_regex().captures(input.trim())?;

    // Try group 1 (URL format) then group 2 (bare ID)
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Map a request failure to `Transport` without the request URL, which carries the API key.
fn transport_error(e: reqwest::Error) -> VidseekError {
    let cause = std::error::Error::source(&e).map(|s| s.to_string());
    let e = e.without_url();
    match cause {
        Some(cause) => VidseekError::Transport(format!("{}: {}", e, cause)),
        None => VidseekError::Transport(e.to_string()),
    }
}

/// Search response body. Only the fields vidseek reads are modelled.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Snippet {
    title: String,
    description: String,
    channel_title: String,
    published_at: Option<String>,
}

/// Map a search response body into candidates, preserving source order.
fn parse_candidates(body: &str) -> Result<Vec<Candidate>> {
    let response: SearchResponse = serde_json::from_str(body)?;

    let candidates = response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
            let published_at = item
                .snippet
                .published_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc));

            Some(Candidate::new(
                video_id,
                item.snippet.title,
                item.snippet.description,
                item.snippet.channel_title,
                published_at,
            ))
        })
        .collect();

    Ok(candidates)
}

#[async_trait]
impl CandidateSource for YoutubeSearch {
    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str, limit: u32, region: Option<&str>) -> Result<Vec<Candidate>> {
        let max_results = clamp_limit(limit).to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", &max_results),
            ("order", "relevance"),
            ("safeSearch", "none"),
            ("key", &self.api_key),
        ];
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            params.push(("regionCode", region));
        }

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(VidseekError::Transport(format!(
                "search returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(transport_error)?;

        let candidates = parse_candidates(&body)
            .map_err(|e| VidseekError::Transport(format!("unreadable search response: {}", e)))?;

        debug!("Search returned {} candidates", candidates.len());
        Ok(candidates)
    }
}
