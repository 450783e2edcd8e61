//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notes::ParsedNotes;
use crate::domain::transcription::{ImageData, TranscriptionPrompt};

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Model returned no JSON object")]
    NoJson,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Token counts reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Structured result of one transcription call
#[derive(Debug, Clone)]
pub struct Transcription {
    pub notes: ParsedNotes,
    pub usage: TokenUsage,
    /// Model that produced the answer
    pub model: String,
}

/// Cut the JSON object out of a model answer and decode it leniently.
///
/// Models sometimes wrap the object in prose or code fences, so everything
/// outside the first `{` and the last `}` is discarded.
pub fn parse_model_output(raw: &str) -> Result<ParsedNotes, TranscriptionError> {
    let start = raw.find('{').ok_or(TranscriptionError::NoJson)?;
    let end = raw.rfind('}').ok_or(TranscriptionError::NoJson)?;
    if end < start {
        return Err(TranscriptionError::NoJson);
    }

    ParsedNotes::from_json_str(&raw[start..=end])
        .map_err(|e| TranscriptionError::ParseError(e.to_string()))
}

/// Port for handwritten-notes transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a photo of handwritten notes.
    ///
    /// # Arguments
    /// * `image` - The JPEG to transcribe
    /// * `prompt` - The prefix-rule instructions
    ///
    /// # Returns
    /// The parsed notes with token usage, or an error
    async fn transcribe(
        &self,
        image: &ImageData,
        prompt: &TranscriptionPrompt,
    ) -> Result<Transcription, TranscriptionError>;
}

/// Blanket implementation for boxed transcriber types
#[async_trait]
impl Transcriber for Box<dyn Transcriber> {
    async fn transcribe(
        &self,
        image: &ImageData,
        prompt: &TranscriptionPrompt,
    ) -> Result<Transcription, TranscriptionError> {
        self.as_ref().transcribe(image, prompt).await
    }
}
