//! Pre-flight checks before network operations.
//!
//! Validates that required credentials are available before a run starts
//! instead of failing after the first network round trip.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Finding a video requires a search credential.
    Find,
    /// Fetching a transcript for a known video has no hard requirements.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Find => {
            settings.require_api_key()?;
        }
        Operation::Transcript => {
            // Captions are public; the tool is optional
        }
    }
    Ok(())
}
