//! Configuration module for vidseek.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    FallbackPolicy, GeneralSettings, Settings, TranscriptSettings, YoutubeSettings,
    API_KEY_ENV_VARS,
};
