//! Find command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{FallbackPolicy, Settings};
use crate::orchestrator::{Pipeline, QueryRequest};
use crate::search::{MAX_RESULTS, MIN_RESULTS};
use anyhow::Result;

/// Command-line overrides for the find command.
#[derive(Debug, Default, Clone)]
pub struct FindOptions {
    /// Requested result count; out-of-range values are clamped to 1-50.
    pub max: Option<i64>,
    pub outdir: Option<String>,
    pub region: Option<String>,
    pub fallback: Option<FallbackPolicy>,
    pub cookies: Option<String>,
}

impl FindOptions {
    /// Apply the flags that were given on top of the loaded settings.
    fn apply(self, settings: &mut Settings) {
        if let Some(max) = self.max {
            settings.youtube.max_results = max.clamp(MIN_RESULTS as i64, MAX_RESULTS as i64) as u32;
        }
        if let Some(outdir) = self.outdir {
            settings.general.output_dir = outdir;
        }
        if let Some(region) = self.region {
            settings.youtube.region = Some(region);
        }
        if let Some(fallback) = self.fallback {
            settings.transcript.fallback = fallback;
        }
        if let Some(cookies) = self.cookies {
            settings.transcript.cookies = Some(cookies);
        }
    }
}

/// Run the find command.
pub async fn run_find(query: &str, options: FindOptions, mut settings: Settings) -> Result<()> {
    options.apply(&mut settings);

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Find, &settings) {
        Output::info("Run 'vidseek doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let request = QueryRequest::from_settings(query, &settings);
    let pipeline = Pipeline::new(&settings).await?;

    let spinner = Output::spinner(&format!("Searching: {}", query));
    let selection = pipeline.select(&request).await;
    spinner.finish_and_clear();

    let selection = selection?;

    Output::header("Best match");
    Output::candidate(&selection.best);
    println!();

    let spinner = Output::spinner("Fetching transcript...");
    let outcome = pipeline.complete(selection, request.fallback).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    match &outcome.result.transcript {
        Some(transcript) => {
            Output::success(&format!(
                "Transcript found via {} ({} words)",
                transcript.source,
                transcript.word_count()
            ));
            Output::preview(&transcript.text);
        }
        None => {
            Output::warning("No transcript found. Metadata and search results were still saved.");
            if !request.fallback.allows_tool() {
                Output::info("Try --fallback yt-dlp to ask yt-dlp for auto-generated captions.");
            }
        }
    }

    Output::header("Saved");
    let saved = &outcome.saved;
    for path in [&saved.metadata, &saved.transcript, &saved.candidates]
        .into_iter()
        .flatten()
    {
        Output::list_item(&path.display().to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_settings() {
        let mut settings = Settings::default();
        let options = FindOptions {
            max: Some(25),
            outdir: Some("results".to_string()),
            region: Some("GB".to_string()),
            fallback: Some(FallbackPolicy::None),
            cookies: Some("~/cookies.txt".to_string()),
        };

        options.apply(&mut settings);

        assert_eq!(settings.youtube.max_results, 25);
        assert_eq!(settings.general.output_dir, "results");
        assert_eq!(settings.youtube.region.as_deref(), Some("GB"));
        assert_eq!(settings.transcript.fallback, FallbackPolicy::None);
        assert_eq!(settings.transcript.cookies.as_deref(), Some("~/cookies.txt"));
    }

    #[test]
    fn test_out_of_range_max_is_clamped() {
        let mut settings = Settings::default();
        FindOptions {
            max: Some(-3),
            ..Default::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.youtube.max_results, 1);

        FindOptions {
            max: Some(500),
            ..Default::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.youtube.max_results, 50);
    }

    #[test]
    fn test_missing_flags_keep_settings() {
        let mut settings = Settings::default();
        settings.youtube.region = Some("US".to_string());

        FindOptions::default().apply(&mut settings);

        assert_eq!(settings.youtube.max_results, 10);
        assert_eq!(settings.general.output_dir, "out");
        assert_eq!(settings.youtube.region.as_deref(), Some("US"));
        assert_eq!(settings.transcript.fallback, FallbackPolicy::YtDlp);
    }
}
