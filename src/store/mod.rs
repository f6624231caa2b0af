//! Result assembly and persistence.
//!
//! A resolution run ends with a [`ResolutionResult`] handed to a
//! [`ResultSink`]. The filesystem sink writes the documents the CLI promises;
//! the memory sink keeps results around for tests and embedding callers.

mod fs;
mod memory;

pub use fs::FsSink;
pub use memory::MemorySink;

use crate::error::Result;
use crate::search::Candidate;
use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of resolving one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// The chosen candidate.
    pub candidate: Candidate,
    /// Transcript, if any tier produced one. Never blank.
    pub transcript: Option<Transcript>,
    /// Every candidate considered, best first.
    pub candidates: Vec<Candidate>,
}

impl ResolutionResult {
    pub fn has_transcript(&self) -> bool {
        self.transcript.is_some()
    }
}

/// Combine the pieces of a run into a result. A blank transcript is dropped.
pub fn assemble(
    candidate: Candidate,
    transcript: Option<Transcript>,
    candidates: Vec<Candidate>,
) -> ResolutionResult {
    let transcript = transcript.filter(|t| !t.text.trim().is_empty());
    ResolutionResult {
        candidate,
        transcript,
        candidates,
    }
}

/// Where each persisted document ended up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedPaths {
    /// Candidate metadata document.
    pub metadata: Option<PathBuf>,
    /// Transcript text, only when a transcript was present.
    pub transcript: Option<PathBuf>,
    /// Candidate list document.
    pub candidates: Option<PathBuf>,
}

/// Trait for result storage backends.
pub trait ResultSink: Send + Sync {
    /// Persist a result, returning where its documents went.
    fn persist(&self, result: &ResolutionResult) -> Result<SavedPaths>;
}
