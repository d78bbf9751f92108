mod config;

pub use config::{CaptionsConfig, Config, PlaybackConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/lessonplay[-dev]/` based on LESSONPLAY_ENV.
///
/// Set LESSONPLAY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LESSONPLAY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lessonplay-dev")
    } else {
        base_dir.join("lessonplay")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}
