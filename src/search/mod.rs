//! Candidate search for vidseek.
//!
//! Provides a trait-based interface over video search backends and the
//! `Candidate` record they produce.

mod youtube;

pub use youtube::{extract_video_id, YoutubeSearch, SEARCH_URL};

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest number of results a search may request.
pub const MIN_RESULTS: u32 = 1;
/// Largest number of results a search may request.
pub const MAX_RESULTS: u32 = 50;

/// One search result that may be the video the query is looking for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Video identifier, unique per source item.
    pub video_id: String,
    /// Title.
    pub title: String,
    /// Description snippet.
    pub description: String,
    /// Channel or author name.
    pub channel_title: String,
    /// Publication time (if the source reported a parseable one).
    pub published_at: Option<DateTime<Utc>>,
    /// Canonical watch URL.
    pub url: String,
}

impl Candidate {
    /// Create a candidate whose URL is derived from the video ID.
    pub fn new(
        video_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        channel_title: impl Into<String>,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        let video_id = video_id.into();
        let url = watch_url(&video_id);
        Self {
            video_id,
            title: title.into(),
            description: description.into(),
            channel_title: channel_title.into(),
            published_at,
            url,
        }
    }
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Clamp a requested result count into the range the search API accepts.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(MIN_RESULTS, MAX_RESULTS)
}

/// Trait for candidate search backends.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Search for videos matching `query`.
    ///
    /// `limit` is clamped to 1..=50. An empty vector means "no matches" and is
    /// not an error.
    async fn search(&self, query: &str, limit: u32, region: Option<&str>) -> Result<Vec<Candidate>>;
}
