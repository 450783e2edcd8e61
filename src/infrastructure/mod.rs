//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the OpenAI, Gemini and Notion
//! APIs, the local filesystem and the desktop notification service.

pub mod config;
pub mod logging;
pub mod notification;
pub mod notion;
pub mod paths;
pub mod photo;
pub mod store;
pub mod transcription;
pub mod watcher;

// Re-export adapters
pub use config::XdgConfigStore;
pub use logging::init_logging;
pub use photo::JpegImageSource;
pub use notification::{create_notifier, NotifyRustNotifier};
pub use notion::NotionClient;
pub use store::{JsonStateStore, JsonUsageLog};
pub use transcription::{create_transcriber, GeminiTranscriber, OpenAiTranscriber};
