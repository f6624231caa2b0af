//! Vidseek - find a video for a query and fetch its transcript
//!
//! A small CLI tool that searches YouTube for a free-text query, picks the
//! most relevant result with a transparent heuristic, and retrieves its
//! transcript through a chain of caption strategies with an optional
//! external subtitle tool as the last resort.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `search` - Candidate search backends (YouTube Data API)
//! - `ranking` - Heuristic relevance scoring
//! - `captions` - Caption track listing and download
//! - `subtitle_tool` - External subtitle downloader (yt-dlp)
//! - `transcript` - Transcript fallback chain and VTT normalization
//! - `store` - Result persistence
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use vidseek::config::Settings;
//! use vidseek::orchestrator::{Pipeline, QueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings).await?;
//!
//!     let request = QueryRequest::from_settings("IMO 2024 problem 5", &settings);
//!     let outcome = pipeline.find(&request).await?;
//!     println!("Best match: {}", outcome.result.candidate.title);
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod ranking;
pub mod search;
pub mod store;
pub mod subtitle_tool;
pub mod transcript;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, VidseekError};
