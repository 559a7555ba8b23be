mod config;
pub mod database;

pub use config::{Config, ProjectConfig, SheetConfig, TimeConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/ontime[-dev]/` based on ONTIME_ENV.
///
/// Set ONTIME_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ONTIME_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ontime-dev")
    } else {
        base_dir.join("ontime")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
