//! Notification infrastructure module
//!
//! Desktop notices through notify-rust, or nothing when notices are off.

mod notify_rust;

pub use notify_rust::{NotifyRustNotifier, APP_NAME};

use crate::application::ports::{Notifier, SilentNotifier};

/// Create the notifier for the current settings
pub fn create_notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(NotifyRustNotifier::new())
    } else {
        Box::new(SilentNotifier)
    }
}
