//! Pipeline orchestrator for vidseek.
//!
//! Coordinates the whole run: search, ranking, transcript resolution and
//! persistence. One query is resolved fully, step by step, before returning.

use crate::config::{FallbackPolicy, Settings};
use crate::error::{Result, VidseekError};
use crate::ranking::Ranker;
use crate::search::{Candidate, CandidateSource, YoutubeSearch};
use crate::store::{assemble, FsSink, ResolutionResult, ResultSink, SavedPaths};
use crate::transcript::TranscriptResolver;
use std::sync::Arc;
use tracing::{info, instrument};

/// What to search for and how hard to try for a transcript.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Free-text query, e.g. "IMO 2024 problem 5".
    pub query: String,
    /// Number of search results to consider (clamped to 1-50 by the source).
    pub limit: u32,
    /// Optional ISO region code.
    pub region: Option<String>,
    /// Fallback used after the caption tiers.
    pub fallback: FallbackPolicy,
}

impl QueryRequest {
    /// Build a request with limit, region and fallback taken from settings.
    pub fn from_settings(query: impl Into<String>, settings: &Settings) -> Self {
        Self {
            query: query.into(),
            limit: settings.youtube.max_results,
            region: settings.youtube.region.clone(),
            fallback: settings.transcript.fallback,
        }
    }
}

/// The chosen candidate and the ranked list it came from.
#[derive(Debug, Clone)]
pub struct Selection {
    pub best: Candidate,
    pub ranked: Vec<Candidate>,
}

/// Result of a full run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub result: ResolutionResult,
    pub saved: SavedPaths,
}

/// The main orchestrator for the vidseek pipeline.
pub struct Pipeline {
    source: Arc<dyn CandidateSource>,
    ranker: Ranker,
    resolver: TranscriptResolver,
    sink: Arc<dyn ResultSink>,
}

impl Pipeline {
    /// Create the production pipeline. Fails with `Auth` when no API key is configured.
    pub async fn new(settings: &Settings) -> Result<Self> {
        let source = Arc::new(YoutubeSearch::from_settings(settings)?);
        let ranker = Ranker::with_weights(settings.ranking.clone());
        let resolver = TranscriptResolver::from_settings(settings).await?;
        let sink = Arc::new(FsSink::new(settings.output_dir()));

        Ok(Self::with_components(source, ranker, resolver, sink))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        source: Arc<dyn CandidateSource>,
        ranker: Ranker,
        resolver: TranscriptResolver,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            source,
            ranker,
            resolver,
            sink,
        }
    }

    /// Search and rank. Fails with `NoMatch` when there is nothing to choose from.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn select(&self, request: &QueryRequest) -> Result<Selection> {
        let candidates = self
            .source
            .search(&request.query, request.limit, request.region.as_deref())
            .await?;

        if candidates.is_empty() {
            return Err(VidseekError::NoMatch(
                "No videos found for that query. Try adjusting your search.".to_string(),
            ));
        }

        let ranked = self.ranker.rank(&candidates, &request.query);
        let best = ranked
            .first()
            .cloned()
            .ok_or_else(|| VidseekError::NoMatch("Couldn't rank candidates.".to_string()))?;

        info!("Best match: {} ({})", best.title, best.video_id);
        Ok(Selection { best, ranked })
    }

    /// Resolve the transcript for a selection and persist the result.
    ///
    /// Transcript failures never fail the run; only the sink can.
    #[instrument(skip(self, selection), fields(video_id = %selection.best.video_id))]
    pub async fn complete(&self, selection: Selection, fallback: FallbackPolicy) -> Result<PipelineOutcome> {
        let transcript = self.resolver.resolve(&selection.best.video_id, fallback).await;
        if transcript.is_none() {
            info!("No transcript found for {}", selection.best.video_id);
        }

        let result = assemble(selection.best, transcript, selection.ranked);
        let saved = self.sink.persist(&result)?;

        Ok(PipelineOutcome { result, saved })
    }

    /// Run the whole pipeline for one query.
    pub async fn find(&self, request: &QueryRequest) -> Result<PipelineOutcome> {
        let selection = self.select(request).await?;
        self.complete(selection, request.fallback).await
    }
}
