//! Scripted collaborators for unit tests.

use crate::captions::{CaptionFragment, CaptionProvider, CaptionTrack};
use crate::error::{Result, VidseekError};
use crate::search::{Candidate, CandidateSource};
use crate::subtitle_tool::SubtitleTool;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn track(code: &str, generated: bool) -> CaptionTrack {
    CaptionTrack {
        language_code: code.to_string(),
        language: code.to_string(),
        generated,
        translatable: true,
        base_url: format!("https://captions.test/{}", code),
    }
}

fn kind(generated: bool) -> &'static str {
    if generated {
        "generated"
    } else {
        "manual"
    }
}

fn fragments(texts: &[String]) -> Vec<CaptionFragment> {
    texts.iter().map(CaptionFragment::new).collect()
}

/// Caption provider answering from a fixed script. Unscripted calls fail.
pub struct ScriptedCaptions {
    tracks: Option<Vec<CaptionTrack>>,
    responses: HashMap<String, Vec<String>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCaptions {
    pub fn listing(tracks: Vec<CaptionTrack>) -> Self {
        Self {
            tracks: Some(tracks),
            responses: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_listing() -> Self {
        Self {
            tracks: None,
            ..Self::listing(Vec::new())
        }
    }

    fn respond(mut self, key: String, texts: &[&str]) -> Self {
        self.responses
            .insert(key, texts.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn fetch(self, code: &str, generated: bool, texts: &[&str]) -> Self {
        self.respond(format!("fetch:{}:{}", code, kind(generated)), texts)
    }

    pub fn translate(self, code: &str, texts: &[&str]) -> Self {
        self.respond(format!("translate:{}:en", code), texts)
    }

    pub fn direct(self, texts: &[&str]) -> Self {
        self.respond("direct".to_string(), texts)
    }

    /// Shared log of calls made, in order.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    fn answer(&self, call: String, key: &str) -> Result<Vec<CaptionFragment>> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .get(key)
            .map(|texts| fragments(texts))
            .ok_or_else(|| VidseekError::Captions(format!("scripted failure for {}", key)))
    }
}

#[async_trait]
impl CaptionProvider for ScriptedCaptions {
    async fn list_tracks(&self, _video_id: &str) -> Result<Vec<CaptionTrack>> {
        self.calls.lock().unwrap().push("list".to_string());
        self.tracks
            .clone()
            .ok_or_else(|| VidseekError::Captions("scripted listing failure".to_string()))
    }

    async fn fetch(&self, track: &CaptionTrack) -> Result<Vec<CaptionFragment>> {
        let key = format!("fetch:{}:{}", track.language_code, kind(track.generated));
        self.answer(key.clone(), &key)
    }

    async fn translate(&self, track: &CaptionTrack, target_lang: &str) -> Result<Vec<CaptionFragment>> {
        let key = format!("translate:{}:{}", track.language_code, target_lang);
        self.answer(key.clone(), &key)
    }

    async fn fetch_direct(&self, _video_id: &str, languages: &[&str]) -> Result<Vec<CaptionFragment>> {
        self.answer(format!("direct:{}", languages.join(",")), "direct")
    }
}

enum ToolMode {
    Writing(String),
    NoFile,
    Failing,
    Missing,
}

/// Subtitle tool with a scripted outcome.
pub struct ScriptedTool {
    mode: ToolMode,
    calls: Arc<Mutex<usize>>,
    cookies_seen: Arc<Mutex<Option<PathBuf>>>,
}

impl ScriptedTool {
    fn with_mode(mode: ToolMode) -> Self {
        Self {
            mode,
            calls: Arc::new(Mutex::new(0)),
            cookies_seen: Arc::new(Mutex::new(None)),
        }
    }

    /// Succeeds and writes `<id>.en.vtt` with `contents`.
    pub fn writing(contents: &str) -> Self {
        Self::with_mode(ToolMode::Writing(contents.to_string()))
    }

    /// Succeeds without writing a file.
    pub fn no_file() -> Self {
        Self::with_mode(ToolMode::NoFile)
    }

    /// Exits with an error.
    pub fn failing() -> Self {
        Self::with_mode(ToolMode::Failing)
    }

    /// Is not installed.
    pub fn missing() -> Self {
        Self::with_mode(ToolMode::Missing)
    }

    /// For tests where the tool must not matter.
    pub fn unused() -> Self {
        Self::failing()
    }

    pub fn calls(&self) -> Arc<Mutex<usize>> {
        self.calls.clone()
    }

    pub fn cookies_seen(&self) -> Arc<Mutex<Option<PathBuf>>> {
        self.cookies_seen.clone()
    }
}

#[async_trait]
impl SubtitleTool for ScriptedTool {
    fn name(&self) -> &str {
        "scripted-tool"
    }

    async fn fetch_auto_subs(
        &self,
        _url: &str,
        video_id: &str,
        output_dir: &Path,
        cookies: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        *self.calls.lock().unwrap() += 1;
        *self.cookies_seen.lock().unwrap() = cookies.map(Path::to_path_buf);

        match &self.mode {
            ToolMode::Writing(contents) => {
                std::fs::create_dir_all(output_dir)?;
                let path = output_dir.join(format!("{}.en.vtt", video_id));
                std::fs::write(&path, contents)?;
                Ok(Some(path))
            }
            ToolMode::NoFile => Ok(None),
            ToolMode::Failing => Err(VidseekError::ToolFailed("exit status: 1".to_string())),
            ToolMode::Missing => Err(VidseekError::ToolNotFound("scripted-tool".to_string())),
        }
    }
}

/// Candidate source returning a fixed list.
pub struct FixedSource {
    candidates: Vec<Candidate>,
    calls: Arc<Mutex<Vec<u32>>>,
}

impl FixedSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Limits requested, one entry per search.
    pub fn calls(&self) -> Arc<Mutex<Vec<u32>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl CandidateSource for FixedSource {
    async fn search(&self, _query: &str, limit: u32, _region: Option<&str>) -> Result<Vec<Candidate>> {
        self.calls.lock().unwrap().push(limit);
        Ok(self.candidates.clone())
    }
}
