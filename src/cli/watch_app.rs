//! Watch mode runner
//!
//! Works through the images already waiting in the folder, oldest first, then
//! handles new arrivals until shutdown. Every image ends up in `_processed/`
//! or `_failed/`.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::{FailureNotices, ProcessOutcome};
use crate::domain::config::AppConfig;
use crate::infrastructure::watcher::{
    list_pending_images, move_into, wait_until_stable, FolderWatcher, Stability, FAILED_DIR,
    PROCESSED_DIR, STABLE_MAX_POLLS, STABLE_POLL_INTERVAL,
};

use super::app::{
    build_use_case, display_name, spinner_callbacks, AppUseCase, EXIT_ERROR, EXIT_SUCCESS,
};
use super::args::WatchOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Run watch mode
pub async fn run_watch(options: WatchOptions, config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let use_case = match build_use_case(&config, options.notify) {
        Ok(use_case) => use_case,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let folder = options.folder;
    if let Err(e) = tokio::fs::create_dir_all(&folder).await {
        presenter.error(&format!("Cannot use {}: {}", folder.display(), e));
        return ExitCode::from(EXIT_ERROR);
    }

    let shutdown = Arc::new(ShutdownSignal::new());
    if let Err(e) = shutdown.setup() {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // Start watching before the batch so nothing dropped meanwhile is missed
    let (_watcher, mut arrivals) = match FolderWatcher::start(&folder) {
        Ok(started) => started,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.watch_status(&format!("Watching {} (Ctrl-C: exit)", folder.display()));
    info!(folder = %folder.display(), "watching");

    let ctx = WatchContext {
        use_case: &use_case,
        folder: &folder,
        notices: FailureNotices::new(),
    };

    let pending = match list_pending_images(&folder).await {
        Ok(pending) => pending,
        Err(e) => {
            warn!(error = %e, "could not list pending images");
            Vec::new()
        }
    };
    if !pending.is_empty() {
        presenter.info(&format!("{} image(s) waiting", pending.len()));
    }
    for path in pending {
        if shutdown.is_shutdown() {
            break;
        }
        ctx.handle(&path, &mut presenter).await;
    }

    let result = loop {
        if shutdown.is_shutdown() {
            break true;
        }

        tokio::select! {
            _ = shutdown.wait() => break true,
            arrival = arrivals.recv() => match arrival {
                Some(path) => ctx.handle(&path, &mut presenter).await,
                None => {
                    error!("folder watcher stopped");
                    presenter.error("Folder watcher stopped");
                    break false;
                }
            },
        }
    };

    presenter.watch_status("Stopped");

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

struct WatchContext<'a> {
    use_case: &'a AppUseCase,
    folder: &'a Path,
    notices: FailureNotices,
}

impl WatchContext<'_> {
    async fn handle(&self, path: &Path, presenter: &mut Presenter) {
        if !is_inbox_path(path) {
            return;
        }

        match wait_until_stable(path, STABLE_POLL_INTERVAL, STABLE_MAX_POLLS).await {
            Stability::Stable => {}
            Stability::TimedOut => warn!(file = %path.display(), "file still changing; processing anyway"),
            Stability::Vanished => {
                debug!(file = %path.display(), "file gone before processing");
                return;
            }
        }

        let name = display_name(path);
        presenter.start_spinner(&format!("Processing {}...", name));
        let callbacks = spinner_callbacks(presenter.spinner());

        match self.use_case.process(path, &callbacks).await {
            Ok(ProcessOutcome::Appended(output)) => {
                presenter.spinner_success(&format!("{} ({} blocks)", name, output.block_count));
                self.move_to(path, PROCESSED_DIR).await;
            }
            Ok(ProcessOutcome::AlreadyProcessed) => {
                presenter.stop_spinner();
                presenter.info(&format!("Already processed: {}", name));
                self.move_to(path, PROCESSED_DIR).await;
            }
            Ok(ProcessOutcome::InFlight) => presenter.stop_spinner(),
            Err(e) => {
                error!(file = %name, error = %e, "processing failed");
                presenter.spinner_fail(&format!("{}: {}", name, e));
                self.notices
                    .notify(self.use_case.notifier(), path, &e.to_string())
                    .await;
                self.move_to(path, FAILED_DIR).await;
            }
        }
    }

    async fn move_to(&self, path: &Path, dir_name: &str) {
        let dir = self.folder.join(dir_name);
        match move_into(path, &dir).await {
            Ok(target) => debug!(to = %target.display(), "moved"),
            Err(e) => warn!(file = %path.display(), error = %e, "could not move file"),
        }
    }
}

/// Files already moved into an outcome folder are not picked up again
fn is_inbox_path(path: &Path) -> bool {
    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());
    !matches!(parent, Some(PROCESSED_DIR) | Some(FAILED_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_folders_are_not_inbox() {
        assert!(is_inbox_path(Path::new("/w/IMG_1.jpg")));
        assert!(!is_inbox_path(Path::new("/w/_processed/IMG_1.jpg")));
        assert!(!is_inbox_path(Path::new("/w/_failed/IMG_1.jpg")));
    }
}
