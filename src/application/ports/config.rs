//! Settings file port

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent user settings behind the `config` command
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Stored settings; every field is `None` before anything was written
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Where the settings live, as printed by `config path`
    fn location(&self) -> PathBuf;

    /// Write the defaults. Never overwrites an existing file.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load, apply `edit`, and save only when it succeeds.
    async fn update<F, T>(&self, edit: F) -> Result<T, ConfigError>
    where
        F: FnOnce(&mut AppConfig) -> Result<T, ConfigError> + Send,
        T: Send,
    {
        let mut config = self.load().await?;
        let value = edit(&mut config)?;
        self.save(&config).await?;
        Ok(value)
    }
}
