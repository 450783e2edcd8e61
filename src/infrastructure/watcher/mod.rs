//! Watch folder adapters

mod folder;
mod fs_watch;

pub use folder::{
    is_supported_image, list_pending_images, move_into, wait_until_stable, Stability,
    FAILED_DIR, PROCESSED_DIR, STABLE_MAX_POLLS, STABLE_POLL_INTERVAL, SUPPORTED_EXTENSIONS,
};
pub use fs_watch::{FolderWatcher, WatchError};
