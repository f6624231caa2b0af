//! Configuration settings for vidseek.

use crate::error::{Result, VidseekError};
use crate::ranking::ScoringWeights;
use crate::search::SEARCH_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variables checked for the search credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["YOUTUBE_API_KEY", "GOOGLE_API_KEY"];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub transcript: TranscriptSettings,
    pub ranking: ScoringWeights,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where metadata, transcripts and search results are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "out".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// API key used when neither YOUTUBE_API_KEY nor GOOGLE_API_KEY is set.
    pub api_key: Option<String>,
    /// Search endpoint.
    pub search_url: String,
    /// Timeout for the search request.
    pub timeout_seconds: u64,
    /// Default number of search results to consider (1-50).
    pub max_results: u32,
    /// Default ISO region code for the search.
    pub region: Option<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            search_url: SEARCH_URL.to_string(),
            timeout_seconds: 30,
            max_results: 10,
            region: None,
        }
    }
}

/// What to do when no caption tier produced a transcript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Give up: the result carries no transcript.
    #[serde(rename = "none")]
    None,
    /// Ask yt-dlp for auto-generated captions.
    #[default]
    #[serde(rename = "yt-dlp")]
    YtDlp,
}

impl FallbackPolicy {
    /// Whether the external subtitle tool may be invoked.
    pub fn allows_tool(&self) -> bool {
        matches!(self, FallbackPolicy::YtDlp)
    }
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(FallbackPolicy::None),
            "yt-dlp" | "ytdlp" => Ok(FallbackPolicy::YtDlp),
            _ => Err(format!("Unknown fallback mode: {}. Use none or yt-dlp.", s)),
        }
    }
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackPolicy::None => write!(f, "none"),
            FallbackPolicy::YtDlp => write!(f, "yt-dlp"),
        }
    }
}

/// Transcript acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Fallback used after the caption tiers fail.
    pub fallback: FallbackPolicy,
    /// Cookie file passed to yt-dlp for authenticated fetches.
    pub cookies: Option<String>,
    /// yt-dlp executable name or path.
    pub tool_path: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::YtDlp,
            cookies: None,
            tool_path: "yt-dlp".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VidseekError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidseek")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Get the expanded cookie file path, if one is configured.
    pub fn cookies_path(&self) -> Option<PathBuf> {
        self.transcript
            .cookies
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(Self::expand_path)
    }

    /// Resolve the search credential from the environment, then the config file.
    pub fn api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .chain(self.youtube.api_key.clone())
            .find(|key| !key.trim().is_empty())
    }

    /// Like [`Settings::api_key`], but a missing key is an `Auth` error.
    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or_else(|| {
            VidseekError::Auth(
                "set YOUTUBE_API_KEY (preferred) or GOOGLE_API_KEY as an environment variable \
                 (can be placed in a .env file), or youtube.api_key in the config file"
                    .to_string(),
            )
        })
    }
}
