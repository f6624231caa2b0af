//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{FallbackPolicy, Settings};
use crate::error::VidseekError;
use crate::search::extract_video_id;
use crate::store::FsSink;
use crate::transcript::TranscriptResolver;
use anyhow::Result;

/// Command-line overrides for the transcript command.
#[derive(Debug, Default, Clone)]
pub struct TranscriptOptions {
    pub outdir: Option<String>,
    pub fallback: Option<FallbackPolicy>,
    pub cookies: Option<String>,
}

impl TranscriptOptions {
    fn apply(self, settings: &mut Settings) {
        if let Some(outdir) = self.outdir {
            settings.general.output_dir = outdir;
        }
        if let Some(fallback) = self.fallback {
            settings.transcript.fallback = fallback;
        }
        if let Some(cookies) = self.cookies {
            settings.transcript.cookies = Some(cookies);
        }
    }
}

/// Run the transcript command for a known video.
pub async fn run_transcript(input: &str, options: TranscriptOptions, mut settings: Settings) -> Result<()> {
    options.apply(&mut settings);
    preflight::check(Operation::Transcript, &settings)?;

    let video_id = extract_video_id(input).ok_or_else(|| {
        VidseekError::InvalidInput(format!("not a YouTube URL or video ID: {}", input))
    })?;

    let resolver = TranscriptResolver::from_settings(&settings).await?;

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let transcript = resolver
        .resolve(&video_id, settings.transcript.fallback)
        .await;
    spinner.finish_and_clear();

    let Some(transcript) = transcript else {
        return Err(anyhow::anyhow!("No transcript found for {}", video_id));
    };

    let path = FsSink::new(settings.output_dir()).save_transcript(&transcript)?;

    Output::success(&format!(
        "Transcript found via {} ({} words)",
        transcript.source,
        transcript.word_count()
    ));
    Output::preview(&transcript.text);
    Output::kv("Saved", &path.display().to_string());

    Ok(())
}
