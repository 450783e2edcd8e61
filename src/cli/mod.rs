//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;
pub mod watch_app;

// Re-export commonly used types
pub use app::{
    run_format, run_open_last, run_process, run_usage, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, WatchOptions};
pub use presenter::Presenter;
pub use watch_app::run_watch;
