//! Per-user file locations

use std::path::PathBuf;

/// Directory name used below the platform config and data dirs
pub const APP_DIR_NAME: &str = "notes-to-notion";

/// `<config_dir>/notes-to-notion`
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(APP_DIR_NAME)
}

/// `<data_dir>/notes-to-notion`
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_DIR_NAME)
}

/// Dedup state and last-note record
pub fn state_file() -> PathBuf {
    data_dir().join("state.json")
}

/// Token usage log
pub fn usage_file() -> PathBuf {
    data_dir().join("usage.json")
}

/// Directory of the rolling log files
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}
