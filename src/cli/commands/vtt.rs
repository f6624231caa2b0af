//! Vtt command implementation.

use crate::config::Settings;
use crate::transcript::{decode_subtitles, normalize};
use crate::cli::Output;
use anyhow::Result;

/// Print the normalized text of a subtitle file.
pub fn run_vtt(file: &str) -> Result<()> {
    let path = Settings::expand_path(file);
    let raw = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let text = normalize(&decode_subtitles(&raw));
    if text.is_empty() {
        Output::warning("No caption text found in file.");
    } else {
        println!("{}", text);
    }

    Ok(())
}
