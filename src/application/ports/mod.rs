//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod document;
pub mod image_source;
pub mod notifier;
pub mod processed_store;
pub mod transcriber;
pub mod usage_log;

// Re-export common types
pub use config::ConfigStore;
pub use document::{AppendResult, CreatedBlock, DocumentError, DocumentService};
pub use image_source::{ImageError, ImageSource};
pub use notifier::{NotificationError, NotificationIcon, Notifier, SilentNotifier};
pub use processed_store::{LastNote, ProcessedStore, StoreError};
pub use transcriber::{parse_model_output, TokenUsage, Transcriber, Transcription, TranscriptionError};
pub use usage_log::UsageLog;
