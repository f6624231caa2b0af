//! CLI module for Vidseek.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::FallbackPolicy;
use clap::{Parser, Subcommand};

/// Vidseek - find the video for a query and fetch its transcript
///
/// Searches YouTube, picks the most relevant result and saves its metadata
/// and transcript to disk.
#[derive(Parser, Debug)]
#[command(name = "vidseek")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for a video, pick the best match and fetch its transcript
    Find {
        /// Free-text query (e.g. "IMO 2024 problem 5")
        query: String,

        /// Number of search results to consider (clamped to 1-50)
        #[arg(short, long, allow_negative_numbers = true)]
        max: Option<i64>,

        /// Directory for the saved files
        #[arg(short, long)]
        outdir: Option<String>,

        /// ISO 3166-1 region code to bias the search (e.g. "US")
        #[arg(long)]
        region: Option<String>,

        /// What to do when no captions are found (none, yt-dlp)
        #[arg(long)]
        fallback: Option<FallbackPolicy>,

        /// Cookie file passed to yt-dlp
        #[arg(long)]
        cookies: Option<String>,
    },

    /// Fetch the transcript of a known video
    Transcript {
        /// YouTube URL or video ID
        input: String,

        /// Directory for the saved transcript
        #[arg(short, long)]
        outdir: Option<String>,

        /// What to do when no captions are found (none, yt-dlp)
        #[arg(long)]
        fallback: Option<FallbackPolicy>,

        /// Cookie file passed to yt-dlp
        #[arg(long)]
        cookies: Option<String>,
    },

    /// Print the plain text of a WebVTT subtitle file
    Vtt {
        /// Path to the .vtt file
        file: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
