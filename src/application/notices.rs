//! Failure notices, at most one per source file

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::domain::notice::{failure_body, NOTE_FAILED_TITLE};

use super::ports::{NotificationIcon, Notifier};

/// Remembers which files already triggered a failure notice
#[derive(Debug, Default)]
pub struct FailureNotices {
    notified: Mutex<HashSet<PathBuf>>,
}

impl FailureNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a failure notice for `path` unless one was sent already.
    ///
    /// Returns whether a notice went out.
    pub async fn notify<N: Notifier + ?Sized>(
        &self,
        notifier: &N,
        path: &Path,
        error: &str,
    ) -> bool {
        let first = {
            let mut notified = self.notified.lock().unwrap_or_else(|e| e.into_inner());
            notified.insert(path.to_path_buf())
        };
        if !first {
            return false;
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if let Err(e) = notifier
            .notify(
                NOTE_FAILED_TITLE,
                &failure_body(&filename, error),
                NotificationIcon::Error,
            )
            .await
        {
            warn!(error = %e, "failure notification not shown");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationError;
    use async_trait::async_trait;

    #[derive(Default)]
    struct Recorder {
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(
            &self,
            _title: &str,
            message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            self.bodies.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn notifies_once_per_path() {
        let notices = FailureNotices::new();
        let recorder = Recorder::default();
        let path = Path::new("/watch/IMG_1.jpg");

        assert!(notices.notify(&recorder, path, "Notion error: 400\ndetails").await);
        assert!(!notices.notify(&recorder, path, "again").await);
        assert!(
            notices
                .notify(&recorder, Path::new("/watch/IMG_2.jpg"), "x")
                .await
        );

        let bodies = recorder.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0], "IMG_1.jpg — Notion error: 400");
    }
}
