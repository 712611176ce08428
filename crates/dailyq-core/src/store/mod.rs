mod config;
pub mod database;

pub use config::{Config, PromptsConfig, StatsConfig, TimeConfig};
pub use database::RecordStore;

use std::path::PathBuf;

/// Returns `~/.config/dailyq[-dev]/` based on DAILYQ_ENV, or the
/// directory named by DAILYQ_DATA_DIR when set (used by tests).
///
/// Set DAILYQ_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = if let Ok(explicit) = std::env::var("DAILYQ_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("DAILYQ_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("dailyq-dev")
        } else {
            base_dir.join("dailyq")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
