//! Desktop notices through notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Application name shown on notices
pub const APP_NAME: &str = "NotesToNotion";

/// How long a "note added" notice stays up
const SUCCESS_TIMEOUT_MS: u32 = 5_000;

/// Notifier backed by the platform notification service
#[derive(Debug, Default)]
pub struct NotifyRustNotifier;

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self
    }
}

/// Failures stay until dismissed so a photo left in `_failed` is noticed.
fn timeout_for(icon: NotificationIcon) -> Timeout {
    match icon {
        NotificationIcon::Error => Timeout::Never,
        NotificationIcon::Success => Timeout::Milliseconds(SUCCESS_TIMEOUT_MS),
        NotificationIcon::Info => Timeout::Default,
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(title)
            .body(message)
            .icon(icon.icon_name())
            .timeout(timeout_for(icon));

        // show() talks to D-Bus / the OS synchronously
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(drop)
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("notice task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_stay_until_dismissed() {
        assert_eq!(timeout_for(NotificationIcon::Error), Timeout::Never);
        assert_eq!(
            timeout_for(NotificationIcon::Success),
            Timeout::Milliseconds(SUCCESS_TIMEOUT_MS)
        );
        assert_eq!(timeout_for(NotificationIcon::Info), Timeout::Default);
    }
}
