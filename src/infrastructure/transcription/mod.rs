//! Vision model transcriber adapters

mod gemini;
mod openai;

pub use gemini::GeminiTranscriber;
pub use openai::OpenAiTranscriber;

use crate::application::ports::Transcriber;
use crate::domain::transcription::Provider;

/// Create the transcriber for a provider
pub fn create_transcriber(
    provider: Provider,
    api_key: impl Into<String>,
    model: impl Into<String>,
) -> Box<dyn Transcriber> {
    match provider {
        Provider::OpenAi => Box::new(OpenAiTranscriber::with_model(api_key, model)),
        Provider::Gemini => Box::new(GeminiTranscriber::with_model(api_key, model)),
    }
}
