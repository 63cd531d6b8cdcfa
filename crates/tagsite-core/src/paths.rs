//! On-disk locations
//!
//! Config lives under the platform config dir, logs under the local data dir.

use std::path::PathBuf;

const APP_DIR: &str = "tagsite";

/// `~/.config/tagsite` on Linux, equivalent elsewhere
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Directory for the log file, falling back to the temp dir on systems
/// without a local data dir
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

pub fn log_file() -> PathBuf {
    log_dir().join("tagsite.log")
}
