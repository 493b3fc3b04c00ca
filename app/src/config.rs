//! Configuration management for the app shell.

use std::env;
use std::path::PathBuf;

/// Shell configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the workout log is persisted under
    pub data_dir: PathBuf,
    /// Map zoom level for navigation
    pub zoom: u8,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("TRAILMARK_DATA_DIR")
            .unwrap_or_else(|_| "trailmark-data".to_string())
            .into();

        let zoom = env::var("TRAILMARK_ZOOM")
            .unwrap_or_else(|_| "13".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidZoom)?;

        Ok(Self { data_dir, zoom })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TRAILMARK_ZOOM value")]
    InvalidZoom,
}
