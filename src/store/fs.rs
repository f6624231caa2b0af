//! Filesystem result sink.

use super::{ResolutionResult, ResultSink, SavedPaths};
use crate::error::Result;
use crate::transcript::Transcript;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// File name of the candidate list document.
pub const CANDIDATES_FILE: &str = "search_results.json";

/// Writes `<id>.json`, `<id>.txt` and `search_results.json` into a directory.
pub struct FsSink {
    output_dir: PathBuf,
}

impl FsSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn metadata_path(&self, video_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", video_id))
    }

    pub fn transcript_path(&self, video_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.txt", video_id))
    }

    pub fn candidates_path(&self) -> PathBuf {
        self.output_dir.join(CANDIDATES_FILE)
    }

    /// Write `<id>.txt` on its own, creating the directory if needed.
    pub fn save_transcript(&self, transcript: &Transcript) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.transcript_path(&transcript.video_id);
        std::fs::write(&path, &transcript.text)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

impl ResultSink for FsSink {
    #[instrument(skip_all, fields(video_id = %result.candidate.video_id))]
    fn persist(&self, result: &ResolutionResult) -> Result<SavedPaths> {
        std::fs::create_dir_all(&self.output_dir)?;

        let video_id = &result.candidate.video_id;

        let metadata = self.metadata_path(video_id);
        std::fs::write(&metadata, serde_json::to_string_pretty(&result.candidate)?)?;
        debug!("Wrote {}", metadata.display());

        let transcript = match &result.transcript {
            Some(t) => Some(self.save_transcript(t)?),
            None => None,
        };

        let candidates = self.candidates_path();
        std::fs::write(&candidates, serde_json::to_string_pretty(&result.candidates)?)?;

        Ok(SavedPaths {
            metadata: Some(metadata),
            transcript,
            candidates: Some(candidates),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Candidate;
    use crate::store::assemble;
    use crate::transcript::{Transcript, TranscriptSource};

    fn candidate(id: &str, title: &str) -> Candidate {
        Candidate::new(id, title, "desc", "Channel", None)
    }

    #[test]
    fn test_persist_with_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path().join("out"));

        let best = candidate("abcdefghijk", "IMO 2024 Problem 5");
        let transcript = Transcript::from_text("abcdefghijk", TranscriptSource::Manual, "line one\nline two");
        let result = assemble(best.clone(), transcript, vec![best.clone(), candidate("zzzzzzzzzzz", "Other")]);

        let saved = sink.persist(&result).unwrap();

        let meta_path = saved.metadata.unwrap();
        assert_eq!(meta_path, dir.path().join("out").join("abcdefghijk.json"));
        let meta: Candidate = serde_json::from_str(&std::fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta, best);

        let meta_json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta_json["video_id"], "abcdefghijk");
        assert_eq!(meta_json["channel_title"], "Channel");
        assert_eq!(meta_json["url"], "https://www.youtube.com/watch?v=abcdefghijk");

        let txt = std::fs::read_to_string(saved.transcript.unwrap()).unwrap();
        assert_eq!(txt, "line one\nline two");

        let list: Vec<Candidate> =
            serde_json::from_str(&std::fs::read_to_string(saved.candidates.unwrap()).unwrap()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].video_id, "abcdefghijk");
    }

    #[test]
    fn test_persist_without_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());

        let best = candidate("abcdefghijk", "IMO 2024 Problem 5");
        let result = assemble(best.clone(), None, vec![best]);
        let saved = sink.persist(&result).unwrap();

        assert!(saved.metadata.unwrap().exists());
        assert!(saved.transcript.is_none());
        assert!(!sink.transcript_path("abcdefghijk").exists());
        assert!(sink.candidates_path().exists());
    }

    #[test]
    fn test_save_transcript_alone() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path().join("nested"));

        let transcript =
            Transcript::from_text("abcdefghijk", TranscriptSource::ExternalTool, "hello there").unwrap();
        let path = sink.save_transcript(&transcript).unwrap();

        assert_eq!(path, sink.transcript_path("abcdefghijk"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello there");
        assert!(!sink.candidates_path().exists());
    }
}
