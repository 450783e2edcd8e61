//! OpenAI Responses API transcriber adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    parse_model_output, TokenUsage, Transcriber, Transcription, TranscriptionError,
};
use crate::domain::transcription::{ImageData, Provider, TranscriptionPrompt};

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

// Request types for the Responses API

#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: String,
    content: Vec<InputContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent {
    InputText { text: String },
    InputImage { image_url: String },
}

// Response types for the Responses API

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    model: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<Usage>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// OpenAI Responses API transcriber
pub struct OpenAiTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiTranscriber {
    /// Create a new OpenAI transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, Provider::OpenAi.default_model())
    }

    /// Create a new OpenAI transcriber with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the transcriber at another endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    fn build_request(&self, image: &ImageData, prompt: &TranscriptionPrompt) -> ResponsesRequest {
        ResponsesRequest {
            model: self.model.clone(),
            input: vec![InputMessage {
                role: "user".to_string(),
                content: vec![
                    InputContent::InputText {
                        text: prompt.content().to_string(),
                    },
                    InputContent::InputImage {
                        image_url: image.to_data_url(),
                    },
                ],
            }],
        }
    }

    /// Concatenate every `output_text` part of every message
    fn output_text(response: &ResponsesResponse) -> String {
        response
            .output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(
        &self,
        image: &ImageData,
        prompt: &TranscriptionPrompt,
    ) -> Result<Transcription, TranscriptionError> {
        let body = self.build_request(image, prompt);

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(TranscriptionError::ApiError(error.message));
        }

        let notes = parse_model_output(&Self::output_text(&response))?;
        let usage = response.usage.unwrap_or_default();

        Ok(Transcription {
            notes,
            usage: TokenUsage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            },
            model: response.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_text_and_data_url() {
        let transcriber = OpenAiTranscriber::new("sk-test");
        let image = ImageData::jpeg(vec![1, 2, 3]);

        let request = transcriber.build_request(&image, &TranscriptionPrompt::default());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-5-mini");
        let content = &json["input"][0]["content"];
        assert_eq!(content[0]["type"], "input_text");
        assert_eq!(content[1]["type"], "input_image");
        assert_eq!(content[1]["image_url"], "data:image/jpeg;base64,AQID");
    }

    #[test]
    fn output_text_skips_reasoning_items() {
        let response: ResponsesResponse = serde_json::from_value(serde_json::json!({
            "model": "gpt-5-mini",
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "{\"topics\": []}"}
                ]}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();

        assert_eq!(OpenAiTranscriber::output_text(&response), "{\"topics\": []}");
    }

    #[test]
    fn api_url_uses_base() {
        let transcriber = OpenAiTranscriber::new("k").with_base_url("http://127.0.0.1:9/v1/");
        assert_eq!(transcriber.api_url(), "http://127.0.0.1:9/v1/responses");
    }
}
