//! Transcript acquisition.
//!
//! # Tiers
//!
//! A transcript comes from the first of these that yields text:
//!
//! - **Manual**: human-authored English captions.
//! - **Generated**: auto-generated English captions.
//! - **Translated**: the first available track, machine-translated to English.
//! - **Legacy**: a direct caption fetch, used when the track listing failed.
//! - **External tool**: yt-dlp auto-captions, normalized from WebVTT.

mod resolver;
mod vtt;

pub use resolver::{TranscriptResolver, ENGLISH_VARIANTS};
pub use vtt::{decode_subtitles, normalize};

use crate::captions::CaptionFragment;
use serde::{Deserialize, Serialize};

/// The tier a transcript was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptSource {
    Manual,
    Generated,
    Translated,
    Legacy,
    ExternalTool,
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::Manual => write!(f, "manual captions"),
            TranscriptSource::Generated => write!(f, "auto-generated captions"),
            TranscriptSource::Translated => write!(f, "translated captions"),
            TranscriptSource::Legacy => write!(f, "direct caption fetch"),
            TranscriptSource::ExternalTool => write!(f, "yt-dlp auto-captions"),
        }
    }
}

/// Plain-text transcript of a video. Never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Tier that produced it.
    pub source: TranscriptSource,
    /// Newline-separated caption text.
    pub text: String,
}

impl Transcript {
    /// Build a transcript from text, or `None` if the text is blank.
    pub fn from_text(video_id: &str, source: TranscriptSource, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            video_id: video_id.to_string(),
            source,
            text: text.to_string(),
        })
    }

    /// Build a transcript from caption fragments, or `None` if they hold no text.
    pub fn from_fragments(
        video_id: &str,
        source: TranscriptSource,
        fragments: &[CaptionFragment],
    ) -> Option<Self> {
        Self::from_text(video_id, source, &join_fragments(fragments))
    }

    /// Whitespace-separated word count.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Join fragment texts with newlines, skipping whitespace-only fragments.
pub fn join_fragments(fragments: &[CaptionFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_skips_blank_fragments() {
        let fragments = vec![
            CaptionFragment::new("first line"),
            CaptionFragment::new(""),
            CaptionFragment::new("\n"),
            CaptionFragment::new("second line "),
        ];
        assert_eq!(join_fragments(&fragments), "first line\nsecond line");
    }

    #[test]
    fn test_blank_fragments_give_no_transcript() {
        let fragments = vec![CaptionFragment::new("  "), CaptionFragment::new("\n")];
        assert!(Transcript::from_fragments("x", TranscriptSource::Manual, &fragments).is_none());
        assert!(Transcript::from_fragments("x", TranscriptSource::Manual, &[]).is_none());
    }

    #[test]
    fn test_from_text_trims() {
        let t = Transcript::from_text("x", TranscriptSource::Legacy, "  hello there \n").unwrap();
        assert_eq!(t.text, "hello there");
        assert_eq!(t.word_count(), 2);
        assert_eq!(t.source, TranscriptSource::Legacy);
    }
}
