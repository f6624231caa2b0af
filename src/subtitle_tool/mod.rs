//! External subtitle tool.
//!
//! The last transcript tier shells out to a command-line downloader for
//! auto-generated captions. The tool is probed once; when it is missing the
//! resolver gets an [`UnavailableTool`] that reports the problem without
//! failing the pipeline.

mod ytdlp;

pub use ytdlp::YtDlp;

use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for tools that download subtitle files.
#[async_trait]
pub trait SubtitleTool: Send + Sync {
    /// Tool name for messages.
    fn name(&self) -> &str;

    /// Download English auto-captions for `url` into `output_dir`.
    ///
    /// Returns the subtitle file written, or `None` when the tool succeeded
    /// without producing one.
    async fn fetch_auto_subs(
        &self,
        url: &str,
        video_id: &str,
        output_dir: &Path,
        cookies: Option<&Path>,
    ) -> Result<Option<PathBuf>>;
}

/// Stand-in used when the real tool is not installed.
pub struct UnavailableTool {
    name: String,
}

impl UnavailableTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl SubtitleTool for UnavailableTool {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_auto_subs(
        &self,
        _url: &str,
        _video_id: &str,
        _output_dir: &Path,
        _cookies: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        Err(VidseekError::ToolNotFound(self.name.clone()))
    }
}

/// Check whether `program --version` runs successfully.
pub async fn probe_tool(program: &str) -> bool {
    match tokio::process::Command::new(program)
        .arg("--version")
        .output()
        .await
    {
        Ok(output) => output.status.success(),
        Err(e) => {
            debug!("Probe of {} failed: {}", program, e);
            false
        }
    }
}

/// Probe for yt-dlp at `program` and return it, or an [`UnavailableTool`].
pub async fn detect_subtitle_tool(program: &str) -> Arc<dyn SubtitleTool> {
    if probe_tool(program).await {
        Arc::new(YtDlp::with_program(program))
    } else {
        warn!("{} not available; subtitle fallback disabled. Install with: pip install yt-dlp", program);
        Arc::new(UnavailableTool::new(program))
    }
}
