//! CLI command implementations.

mod config;
mod doctor;
mod find;
mod transcript;
mod vtt;

pub use config::run_config;
pub use doctor::run_doctor;
pub use find::{run_find, FindOptions};
pub use transcript::{run_transcript, TranscriptOptions};
pub use vtt::run_vtt;
