//! Caption track access.
//!
//! Abstracts the service that lists a video's caption tracks, fetches them,
//! and machine-translates them, so the transcript resolver can be driven by
//! the real YouTube backend or by a scripted fake in tests.

mod youtube;

pub use youtube::YoutubeCaptions;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One language/kind variant of timed captions available for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// BCP-47 style language code (e.g. "en", "en-US").
    pub language_code: String,
    /// Human-readable language name.
    pub language: String,
    /// Whether the track was produced by speech recognition.
    pub generated: bool,
    /// Whether the service can machine-translate this track.
    pub translatable: bool,
    /// URL the track is fetched from.
    pub base_url: String,
}

/// A single caption cue's text. Timing is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    pub text: String,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait for caption backends.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// List the caption tracks available for a video, in service order.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>>;

    /// Fetch a track's fragments in playback order.
    async fn fetch(&self, track: &CaptionTrack) -> Result<Vec<CaptionFragment>>;

    /// Fetch a track machine-translated into `target_lang`.
    async fn translate(&self, track: &CaptionTrack, target_lang: &str) -> Result<Vec<CaptionFragment>>;

    /// Fetch captions directly by video ID, trying `languages` in order.
    ///
    /// Does not need a track listing; used when listing is unavailable.
    async fn fetch_direct(&self, video_id: &str, languages: &[&str]) -> Result<Vec<CaptionFragment>>;
}

/// Find a track for the first language in `languages` that has one of the
/// requested kind.
pub fn find_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[&str],
    generated: bool,
) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        tracks
            .iter()
            .find(|t| t.generated == generated && t.language_code == *lang)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: code.to_string(),
            language: code.to_string(),
            generated,
            translatable: true,
            base_url: format!("https://example.com/{}", code),
        }
    }

    #[test]
    fn test_find_track_follows_preference_order() {
        let tracks = vec![track("en-GB", false), track("en-US", false), track("en", true)];

        let found = find_track(&tracks, &["en-US", "en-GB"], false).unwrap();
        assert_eq!(found.language_code, "en-US");

        let found = find_track(&tracks, &["en-GB", "en-US"], false).unwrap();
        assert_eq!(found.language_code, "en-GB");
    }

    #[test]
    fn test_find_track_respects_kind() {
        let tracks = vec![track("en", true), track("de", false)];

        assert!(find_track(&tracks, &["en"], false).is_none());
        assert_eq!(
            find_track(&tracks, &["en", "en-US"], true).map(|t| t.language_code.as_str()),
            Some("en")
        );
    }
}
