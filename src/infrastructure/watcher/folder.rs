//! Inbox folder helpers

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::fs;

/// Extensions accepted in the watch folder, lowercase
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic"];

/// Subfolder for photos that were appended
pub const PROCESSED_DIR: &str = "_processed";
/// Subfolder for photos that failed
pub const FAILED_DIR: &str = "_failed";

/// Delay between two size polls
pub const STABLE_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Maximum number of size polls
pub const STABLE_MAX_POLLS: usize = 60;

/// Outcome of waiting for a file to stop growing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    /// Non-zero size, unchanged across two polls
    Stable,
    /// Still changing after the last poll
    TimedOut,
    /// File disappeared
    Vanished,
}

/// Name-based filter: not hidden, supported extension
pub fn is_supported_image(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(true, |n| n.starts_with('.'));
    if hidden {
        return false;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Supported images directly in `dir`, oldest modification first
pub async fn list_pending_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_supported_image(&path) {
            continue;
        }
        let meta = match entry.metadata().await {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        found.push((modified, path));
    }

    found.sort();
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

/// Poll the file size until it is non-zero and unchanged between polls
pub async fn wait_until_stable(path: &Path, interval: Duration, max_polls: usize) -> Stability {
    let mut last: Option<u64> = None;

    for _ in 0..max_polls {
        let size = match fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(_) => return Stability::Vanished,
        };
        if size > 0 && last == Some(size) {
            return Stability::Stable;
        }
        last = Some(size);
        tokio::time::sleep(interval).await;
    }

    Stability::TimedOut
}

/// Move `path` into `dir`, replacing a file of the same name
pub async fn move_into(path: &Path, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let target = dir.join(name);
    fs::rename(path, &target).await?;
    Ok(target)
}
