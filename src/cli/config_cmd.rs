//! Config command handler

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::notion::PageId;
use crate::domain::transcription::Provider;

use super::args::{is_valid_config_key, ConfigAction, SECRET_CONFIG_KEYS, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.location().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let stored = store
        .update(|config| apply_config_value(config, key, value))
        .await?;

    presenter.success(&format!("{} = {}", key, display_value(key, &stored)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&display_value(key, &v)),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = config_value(&config, key)
            .map(|v| display_value(key, &v))
            .unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.location().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate `value` for `key` and store it in `config`.
///
/// Returns the value as stored, which may be normalized (page ids, providers).
fn apply_config_value(
    config: &mut AppConfig,
    key: &str,
    value: &str,
) -> Result<String, ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    let stored = match key {
        "provider" => {
            let provider: Provider = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            let stored = provider.as_str().to_string();
            config.provider = Some(stored.clone());
            stored
        }
        "model" => {
            let model = value.trim();
            if model.is_empty() {
                return Err(invalid("Model name cannot be empty".to_string()));
            }
            config.model = Some(model.to_string());
            model.to_string()
        }
        "api_key" => {
            config.api_key = Some(value.to_string());
            value.to_string()
        }
        "notion_token" => {
            config.notion_token = Some(value.to_string());
            value.to_string()
        }
        "notion_page" => {
            let page: PageId = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            let stored = page.as_str().to_string();
            config.notion_page = Some(stored.clone());
            stored
        }
        "watch_folder" => {
            config.watch_folder = Some(value.to_string());
            value.to_string()
        }
        "notify" => {
            let enabled = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.notify = Some(enabled);
            enabled.to_string()
        }
        "log_level" => {
            EnvFilter::try_new(value).map_err(|e| invalid(e.to_string()))?;
            config.log_level = Some(value.to_string());
            value.to_string()
        }
        _ => return Err(invalid("Unknown key".to_string())),
    };

    Ok(stored)
}

/// Raw value of a key, if set
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "provider" => config.provider.clone(),
        "model" => config.model.clone(),
        "api_key" => config.api_key.clone(),
        "notion_token" => config.notion_token.clone(),
        "notion_page" => config.notion_page.clone(),
        "watch_folder" => config.watch_folder.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

fn display_value(key: &str, value: &str) -> String {
    if SECRET_CONFIG_KEYS.contains(&key) {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_secret(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn mask_secret_long() {
        assert_eq!(mask_secret("secret_abcdefghijklmnop"), "secr...mnop");
    }

    #[test]
    fn mask_secret_short() {
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn only_secrets_are_masked() {
        assert_eq!(display_value("notion_token", "ntn_1234567890"), "ntn_...7890");
        assert_eq!(display_value("model", "gpt-5-mini"), "gpt-5-mini");
    }

    #[test]
    fn notion_page_is_stored_normalized() {
        let mut config = AppConfig::empty();
        let stored = apply_config_value(
            &mut config,
            "notion_page",
            "https://www.notion.so/Journal-0123456789abcdef0123456789ABCDEF?pvs=4",
        )
        .unwrap();
        assert_eq!(stored, "01234567-89ab-cdef-0123-456789abcdef");
        assert_eq!(config.notion_page.as_deref(), Some(stored.as_str()));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::empty();
        assert!(apply_config_value(&mut config, "notion_page", "not-a-page").is_err());
        assert!(apply_config_value(&mut config, "provider", "claude").is_err());
        assert!(apply_config_value(&mut config, "notify", "maybe").is_err());
        assert!(apply_config_value(&mut config, "model", "  ").is_err());
        assert!(config.notion_page.is_none());
        assert!(config.provider.is_none());
    }

    #[test]
    fn provider_is_normalized() {
        let mut config = AppConfig::empty();
        let stored = apply_config_value(&mut config, "provider", "Gemini").unwrap();
        assert_eq!(stored, "gemini");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(check_key("duration").is_err());
        assert!(check_key("watch_folder").is_ok());
    }

    #[tokio::test]
    async fn set_then_get_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "notify".to_string(),
                value: "no".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.notify, Some(false));
        assert_eq!(config_value(&config, "notify").as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn rejected_set_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let result = handle_config_command(
            ConfigAction::Set {
                key: "notion_page".to_string(),
                value: "not-a-page".to_string(),
            },
            &store,
            &presenter,
        )
        .await;

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.location().exists());
    }
}
