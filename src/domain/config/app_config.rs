//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::notion::PageId;
use crate::domain::transcription::Provider;

/// Log filter used when neither the config nor `RUST_LOG` sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub notion_token: Option<String>,
    pub notion_page: Option<String>,
    pub watch_folder: Option<String>,
    pub notify: Option<bool>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            provider: Some(Provider::default().as_str().to_string()),
            model: None,
            api_key: None,
            notion_token: None,
            notion_page: None,
            watch_folder: None,
            notify: Some(true),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: other.provider.or(self.provider),
            model: other.model.or(self.model),
            api_key: other.api_key.or(self.api_key),
            notion_token: other.notion_token.or(self.notion_token),
            notion_page: other.notion_page.or(self.notion_page),
            watch_folder: other.watch_folder.or(self.watch_folder),
            notify: other.notify.or(self.notify),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get provider as parsed Provider, or default if not set/invalid
    pub fn provider_or_default(&self) -> Provider {
        self.provider
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the model, or the provider's default model
    pub fn model_or_default(&self) -> String {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.provider_or_default().default_model().to_string())
    }

    /// Get the Notion page id, if configured and valid
    pub fn page_id(&self) -> Option<PageId> {
        self.notion_page.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get the watch folder with `~` expanded
    pub fn watch_folder_path(&self) -> Option<PathBuf> {
        self.watch_folder.as_deref().map(expand_home)
    }

    /// Get notify setting, or true if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(true)
    }

    /// Get log level, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert!(config.notion_token.is_none());
        assert_eq!(config.provider, Some("openai".to_string()));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.log_level, Some("info".to_string()));
        assert_eq!(config.model_or_default(), "gpt-5-mini");
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.provider.is_none());
        assert!(config.model.is_none());
        assert!(config.notion_page.is_none());
        assert!(config.watch_folder.is_none());
        assert!(config.notify.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            model: Some("gpt-5-mini".to_string()),
            provider: Some("openai".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            model: None, // Should not override
            provider: Some("gemini".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.model, Some("gpt-5-mini".to_string()));
        assert_eq!(merged.provider, Some("gemini".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            notion_token: Some("secret".to_string()),
            notify: Some(false),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.notion_token, Some("secret".to_string()));
        assert_eq!(merged.notify, Some(false));
    }

    #[test]
    fn provider_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            provider: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_eq!(config.provider_or_default(), Provider::OpenAi);
    }

    #[test]
    fn model_follows_provider_when_unset() {
        let config = AppConfig {
            provider: Some("gemini".to_string()),
            model: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model_or_default(), "gemini-2.0-flash");
    }

    #[test]
    fn page_id_parses_url() {
        let config = AppConfig {
            notion_page: Some(
                "https://www.notion.so/Log-0123456789abcdef0123456789abcdef".to_string(),
            ),
            ..Default::default()
        };
        assert_eq!(
            config.page_id().unwrap().as_str(),
            "01234567-89ab-cdef-0123-456789abcdef"
        );
    }

    #[test]
    fn page_id_none_when_invalid() {
        let config = AppConfig {
            notion_page: Some("not a page".to_string()),
            ..Default::default()
        };
        assert!(config.page_id().is_none());
    }

    #[test]
    fn watch_folder_keeps_absolute_path() {
        let config = AppConfig {
            watch_folder: Some("/tmp/notes".to_string()),
            ..Default::default()
        };
        assert_eq!(config.watch_folder_path(), Some(PathBuf::from("/tmp/notes")));
    }

    #[test]
    fn boolean_and_level_defaults() {
        let config = AppConfig::empty();
        assert!(config.notify_or_default());
        assert_eq!(config.log_level_or_default(), "info");
    }
}
