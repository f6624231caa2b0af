//! yt-dlp auto-caption downloader.

use super::SubtitleTool;
use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Runs yt-dlp to fetch English auto-captions without downloading the video.
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new() -> Self {
        Self::with_program("yt-dlp")
    }

    /// Use a specific executable name or path.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command-line arguments for a caption-only fetch.
    fn args(url: &str, cookies: Option<&Path>) -> Vec<String> {
        let mut args: Vec<String> = [
            "--write-auto-sub",
            "--skip-download",
            "--sub-lang",
            "en",
            "-o",
            "%(id)s.%(ext)s",
            url,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if let Some(cookies) = cookies {
            args.push("--cookies".to_string());
            args.push(cookies.display().to_string());
        }

        args
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleTool for YtDlp {
    fn name(&self) -> &str {
        &self.program
    }

    #[instrument(skip(self, output_dir, cookies), fields(video_id = %video_id))]
    async fn fetch_auto_subs(
        &self,
        url: &str,
        video_id: &str,
        output_dir: &Path,
        cookies: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        tokio::fs::create_dir_all(output_dir).await?;

        info!("Requesting auto-captions from {}", self.program);

        let result = Command::new(&self.program)
            .args(Self::args(url, cookies))
            .current_dir(output_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VidseekError::ToolNotFound(self.program.clone()));
            }
            Err(e) => {
                return Err(VidseekError::ToolFailed(format!(
                    "{} execution failed: {e}",
                    self.program
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VidseekError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let found = find_subtitle_file(output_dir, video_id).await?;
        debug!("Subtitle file: {:?}", found);
        Ok(found)
    }
}

/// Locate the subtitle file written for a video.
///
/// Only `<id>*.vtt` counts. Other `.vtt` files in the directory belong to
/// earlier runs for other videos.
pub async fn find_subtitle_file(dir: &Path, video_id: &str) -> Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut vtts = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches_id = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with(video_id))
            .unwrap_or(false);
        if matches_id && path.is_file() && path.extension().is_some_and(|ext| ext == "vtt") {
            vtts.push(path);
        }
    }

    // yt-dlp names files `<id>.<lang>.vtt`; prefer the lowest name for stable picks
    vtts.sort();
    Ok(vtts.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_without_cookies() {
        let args = YtDlp::args("https://www.youtube.com/watch?v=abc", None);
        assert_eq!(
            args,
            vec![
                "--write-auto-sub",
                "--skip-download",
                "--sub-lang",
                "en",
                "-o",
                "%(id)s.%(ext)s",
                "https://www.youtube.com/watch?v=abc",
            ]
        );
    }

    #[test]
    fn test_args_with_cookies() {
        let args = YtDlp::args("u", Some(Path::new("/tmp/cookies.txt")));
        assert_eq!(&args[args.len() - 2..], &["--cookies", "/tmp/cookies.txt"]);
    }

    #[tokio::test]
    async fn test_find_subtitle_prefers_video_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aaaother.en.vtt"), "WEBVTT").unwrap();
        std::fs::write(dir.path().join("abcdefghijk.en.vtt"), "WEBVTT").unwrap();
        std::fs::write(dir.path().join("abcdefghijk.json"), "{}").unwrap();

        let found = find_subtitle_file(dir.path(), "abcdefghijk").await.unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "abcdefghijk.en.vtt");
    }

    #[tokio::test]
    async fn test_find_subtitle_ignores_other_videos() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("OLDVIDEO123.en.vtt"), "WEBVTT\n\nold words").unwrap();

        let found = find_subtitle_file(dir.path(), "NEWVIDEO456").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_subtitle_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abcdefghijk.json"), "{}").unwrap();
        assert!(find_subtitle_file(dir.path(), "abcdefghijk").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let tool = YtDlp::with_program("vidseek-no-such-program-xyz");
        let err = tool
            .fetch_auto_subs("u", "x", dir.path(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, VidseekError::ToolNotFound(_)));
    }
}
