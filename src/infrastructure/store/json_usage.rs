//! JSON file usage log

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::application::ports::{StoreError, UsageLog};
use crate::domain::usage::UsageEvent;
use crate::infrastructure::paths;

use super::atomic::{read_json_or_default, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsageFile {
    #[serde(default)]
    events: Vec<UsageEvent>,
}

/// Usage log kept as `{"events": [...]}` in one JSON file
pub struct JsonUsageLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonUsageLog {
    /// Log at the default per-user location
    pub fn new() -> Self {
        Self::with_path(paths::usage_file())
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

impl Default for JsonUsageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageLog for JsonUsageLog {
    async fn append(&self, event: UsageEvent) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file: UsageFile = read_json_or_default(&self.path).await?;
        file.events.push(event);
        write_json_atomic(&self.path, &file).await
    }

    async fn load(&self) -> Result<Vec<UsageEvent>, StoreError> {
        let _guard = self.lock.lock().await;
        let file: UsageFile = read_json_or_default(&self.path).await?;
        Ok(file.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn event(n: u64) -> UsageEvent {
        UsageEvent {
            ts: n as f64,
            model: "gpt-5-mini".to_string(),
            input_tokens: n,
            output_tokens: n,
            filename: format!("{}.jpg", n),
        }
    }

    #[tokio::test]
    async fn missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = JsonUsageLog::with_path(dir.path().join("usage.json"));
        assert!(log.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(JsonUsageLog::with_path(dir.path().join("usage.json")));

        let tasks: Vec<_> = (0..20)
            .map(|n| {
                let log = Arc::clone(&log);
                tokio::spawn(async move { log.append(event(n)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(log.load().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn non_list_events_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.json");
        std::fs::write(&path, r#"{"events": "oops"}"#).unwrap();

        let log = JsonUsageLog::with_path(&path);
        assert!(log.load().await.unwrap().is_empty());
    }
}
