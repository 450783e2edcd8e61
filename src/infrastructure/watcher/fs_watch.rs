//! Filesystem notifications for the inbox folder

use std::path::{Path, PathBuf};

use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, warn};

use super::folder::is_supported_image;

/// Watcher errors
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to watch {path}: {message}")]
    WatchFailed { path: String, message: String },
}

/// Keeps the OS watcher alive; dropping it stops the events
pub struct FolderWatcher {
    _watcher: RecommendedWatcher,
}

impl FolderWatcher {
    /// Watch `dir` (non-recursive) and stream paths of new candidate images
    pub fn start(dir: &Path) -> Result<(Self, mpsc::Receiver<PathBuf>), WatchError> {
        let (tx, rx) = mpsc::channel(100);
        let to_error = |e: notify::Error| WatchError::WatchFailed {
            path: dir.display().to_string(),
            message: e.to_string(),
        };

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for path in arrived_images(&event) {
                    if let Err(e) = tx.blocking_send(path) {
                        error!("Failed to send file event: {:?}", e);
                    }
                }
            }
            Err(e) => warn!("Watch error: {:?}", e),
        })
        .map_err(to_error)?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(to_error)?;

        Ok((Self { _watcher: watcher }, rx))
    }
}

/// Images that appeared through creation or a move into the folder
fn arrived_images(event: &Event) -> Vec<PathBuf> {
    let arrived = match event.kind {
        EventKind::Create(CreateKind::Folder) => false,
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => true,
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            // paths = [from, to]
            return event
                .paths
                .last()
                .filter(|p| is_supported_image(p))
                .cloned()
                .into_iter()
                .collect();
        }
        _ => false,
    };

    if !arrived {
        return Vec::new();
    }

    event
        .paths
        .iter()
        .filter(|p| is_supported_image(p))
        .cloned()
        .collect()
}
