//! Whole-file JSON persistence with atomic replacement

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::application::ports::StoreError;

fn write_error(path: &Path, e: impl ToString) -> StoreError {
    StoreError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Read a JSON file. A missing or malformed file yields the default value.
pub async fn read_json_or_default<T: DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, StoreError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(StoreError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable state file");
            Ok(T::default())
        }
    }
}

/// Write pretty JSON to a sibling temp file, then rename it over `path`
pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| write_error(path, e))?;
    }

    let content = serde_json::to_string_pretty(value).map_err(|e| write_error(path, e))?;
    let tmp = temp_path(path);

    fs::write(&tmp, content)
        .await
        .map_err(|e| write_error(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| write_error(path, e))?;

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
