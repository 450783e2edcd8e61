//! Transcription domain module

mod image_data;
mod prompt;
mod provider;

pub use image_data::{ImageData, ImageMimeType};
pub use prompt::TranscriptionPrompt;
pub use provider::{Provider, ALL_PROVIDERS};
