//! Ordered transcript fallback chain.

use super::{decode_subtitles, normalize, Transcript, TranscriptSource};
use crate::captions::{find_track, CaptionProvider, CaptionTrack, YoutubeCaptions};
use crate::config::{FallbackPolicy, Settings};
use crate::error::{Result, VidseekError};
use crate::search::watch_url;
use crate::subtitle_tool::{detect_subtitle_tool, SubtitleTool, UnavailableTool};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// English language codes, in preference order.
pub const ENGLISH_VARIANTS: [&str; 3] = ["en", "en-US", "en-GB"];

/// Manual caption preferences, tried one after the other.
const MANUAL_PREFERENCES: [&[&str]; 2] = [&["en"], &["en-US", "en-GB"]];

/// One caption strategy in the chain.
#[derive(Debug, Clone, Copy)]
enum Attempt {
    Manual(&'static [&'static str]),
    Generated,
    TranslateFirst,
    Legacy,
}

/// Resolves a transcript for a video by trying caption strategies in order,
/// then optionally the external subtitle tool.
///
/// Every strategy fails independently: errors are logged and the next one is
/// tried. Nothing is cached.
pub struct TranscriptResolver {
    captions: Arc<dyn CaptionProvider>,
    tool: Arc<dyn SubtitleTool>,
    output_dir: PathBuf,
    cookies: Option<PathBuf>,
}

impl TranscriptResolver {
    /// Create a resolver. Subtitle files from the tool are written to `output_dir`.
    pub fn new(
        captions: Arc<dyn CaptionProvider>,
        tool: Arc<dyn SubtitleTool>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            captions,
            tool,
            output_dir: output_dir.into(),
            cookies: None,
        }
    }

    /// Build the production resolver: YouTube captions plus yt-dlp.
    ///
    /// The tool is only probed when the configured fallback can use it.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let captions: Arc<dyn CaptionProvider> = Arc::new(YoutubeCaptions::new()?);
        let tool_path = &settings.transcript.tool_path;
        let tool: Arc<dyn SubtitleTool> = if settings.transcript.fallback.allows_tool() {
            detect_subtitle_tool(tool_path).await
        } else {
            Arc::new(UnavailableTool::new(tool_path.as_str()))
        };

        Ok(Self::new(captions, tool, settings.output_dir()).with_cookies(settings.cookies_path()))
    }

    /// Pass a cookie file to the subtitle tool.
    pub fn with_cookies(mut self, cookies: Option<PathBuf>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Resolve a transcript, or `None` if every permitted tier came up empty.
    #[instrument(skip(self), fields(video_id = %video_id))]
    pub async fn resolve(&self, video_id: &str, policy: FallbackPolicy) -> Option<Transcript> {
        if let Some(transcript) = self.resolve_captions(video_id).await {
            info!("Transcript found via {}", transcript.source);
            return Some(transcript);
        }

        if !policy.allows_tool() {
            info!("Caption tiers exhausted and subtitle fallback is disabled");
            return None;
        }

        match self.resolve_with_tool(video_id).await {
            Ok(Some(transcript)) => {
                info!("Transcript found via {}", transcript.source);
                Some(transcript)
            }
            Ok(None) => None,
            Err(VidseekError::ToolNotFound(tool)) => {
                warn!("{} not installed. Install with: pip install yt-dlp", tool);
                None
            }
            Err(e) => {
                warn!("Subtitle fallback failed: {}", e);
                None
            }
        }
    }

    /// Run the caption tiers. Listing failure routes straight to the legacy fetch.
    async fn resolve_captions(&self, video_id: &str) -> Option<Transcript> {
        let (tracks, attempts): (Vec<CaptionTrack>, Vec<Attempt>) =
            match self.captions.list_tracks(video_id).await {
                Ok(tracks) => {
                    let mut attempts: Vec<Attempt> =
                        MANUAL_PREFERENCES.iter().map(|langs| Attempt::Manual(*langs)).collect();
                    attempts.push(Attempt::Generated);
                    attempts.push(Attempt::TranslateFirst);
                    (tracks, attempts)
                }
                Err(e) => {
                    debug!("Listing caption tracks failed: {}", e);
                    (Vec::new(), vec![Attempt::Legacy])
                }
            };

        for attempt in attempts {
            match self.try_attempt(video_id, &tracks, attempt).await {
                Ok(Some(transcript)) => return Some(transcript),
                Ok(None) => debug!("{:?} produced no text", attempt),
                Err(e) => debug!("{:?} failed: {}", attempt, e),
            }
        }

        None
    }

    async fn try_attempt(
        &self,
        video_id: &str,
        tracks: &[CaptionTrack],
        attempt: Attempt,
    ) -> Result<Option<Transcript>> {
        let (source, fragments) = match attempt {
            Attempt::Manual(languages) => {
                let track = find_track(tracks, languages, false).ok_or_else(|| {
                    VidseekError::Captions(format!("no manual captions for {:?}", languages))
                })?;
                (TranscriptSource::Manual, self.captions.fetch(track).await?)
            }
            Attempt::Generated => {
                let track = find_track(tracks, &ENGLISH_VARIANTS, true).ok_or_else(|| {
                    VidseekError::Captions("no generated English captions".to_string())
                })?;
                (TranscriptSource::Generated, self.captions.fetch(track).await?)
            }
            Attempt::TranslateFirst => {
                let first = tracks
                    .first()
                    .ok_or_else(|| VidseekError::Captions("no caption tracks".to_string()))?;
                (
                    TranscriptSource::Translated,
                    self.captions.translate(first, "en").await?,
                )
            }
            Attempt::Legacy => (
                TranscriptSource::Legacy,
                self.captions.fetch_direct(video_id, &ENGLISH_VARIANTS).await?,
            ),
        };

        Ok(Transcript::from_fragments(video_id, source, &fragments))
    }

    /// Fetch auto-captions with the external tool and normalize the subtitle file.
    async fn resolve_with_tool(&self, video_id: &str) -> Result<Option<Transcript>> {
        info!("Trying {} auto-captions fallback", self.tool.name());

        let path = self
            .tool
            .fetch_auto_subs(
                &watch_url(video_id),
                video_id,
                &self.output_dir,
                self.cookies.as_deref(),
            )
            .await?;

        let Some(path) = path else {
            warn!("{} finished without writing a subtitle file", self.tool.name());
            return Ok(None);
        };

        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| VidseekError::Parse(format!("cannot read {}: {}", path.display(), e)))?;
        let text = normalize(&decode_subtitles(&raw));

        let transcript = Transcript::from_text(video_id, TranscriptSource::ExternalTool, &text);
        if transcript.is_none() {
            warn!("{} produced an empty transcript", path.display());
        }
        Ok(transcript)
    }
}
