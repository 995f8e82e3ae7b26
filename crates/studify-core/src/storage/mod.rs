mod config;

pub use config::{Config, ExamConfig, PlannerConfig, ProfileConfig, UiConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml`.
///
/// Resolution order:
/// 1. `STUDIFY_DATA_DIR`, used as-is
/// 2. `~/.config/studify-dev/` when `STUDIFY_ENV=dev`
/// 3. `~/.config/studify/`
///
/// The directory is created if missing.
///
/// # Errors
/// Returns an error if no home directory is known and no override is set,
/// or if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDIFY_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(".config");
            let env = std::env::var("STUDIFY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studify-dev")
            } else {
                base_dir.join("studify")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
