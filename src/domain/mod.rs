//! Domain layer - Core business logic
//!
//! Contains value objects, the note formatter, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notes;
pub mod notice;
pub mod notion;
pub mod transcription;
pub mod usage;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notes::{build_blocks, AttachmentId, Block, ParsedNotes};
pub use notion::PageId;
pub use transcription::{ImageData, ImageMimeType, Provider, TranscriptionPrompt};
pub use usage::{UsageEvent, UsageSummary};
