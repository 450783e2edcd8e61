//! Transcription provider value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidProviderError;

/// All available providers
pub const ALL_PROVIDERS: &[Provider] = &[Provider::OpenAi, Provider::Gemini];

/// Vision model backends that can transcribe a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    Gemini,
}

impl Provider {
    /// Get the human-readable label for this provider
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI Responses API",
            Self::Gemini => "Google Gemini",
        }
    }

    /// Model used when none is configured
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-5-mini",
            Self::Gemini => "gemini-2.0-flash",
        }
    }

    /// Environment variable holding the API key
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Get the string identifier for this provider
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl FromStr for Provider {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            _ => Err(InvalidProviderError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_providers() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("  GEMINI ".parse::<Provider>().unwrap(), Provider::Gemini);
    }

    #[test]
    fn parse_invalid() {
        assert!("claude".parse::<Provider>().is_err());
        assert!("".parse::<Provider>().is_err());
    }

    #[test]
    fn default_is_openai() {
        assert_eq!(Provider::default(), Provider::OpenAi);
        assert_eq!(Provider::default().default_model(), "gpt-5-mini");
    }

    #[test]
    fn api_key_env_per_provider() {
        assert_eq!(Provider::OpenAi.api_key_env(), "OPENAI_API_KEY");
        assert_eq!(Provider::Gemini.api_key_env(), "GEMINI_API_KEY");
    }

    #[test]
    fn all_providers_have_labels() {
        for provider in ALL_PROVIDERS {
            assert!(!provider.label().is_empty());
        }
    }
}
