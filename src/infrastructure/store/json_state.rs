//! JSON file store for processed fingerprints and the last note

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::application::ports::{LastNote, ProcessedStore, StoreError};
use crate::infrastructure::paths;

use super::atomic::{read_json_or_default, write_json_atomic};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProcessedEntry {
    name: String,
    ts: f64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    processed: BTreeMap<String, ProcessedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_note_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_note_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_note_ts: Option<f64>,
}

/// State kept in a single JSON file
pub struct JsonStateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStateStore {
    /// Store at the default per-user location
    pub fn new() -> Self {
        Self::with_path(paths::state_file())
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read-modify-write under the store lock
    async fn update(&self, change: impl FnOnce(&mut StateFile)) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut state: StateFile = read_json_or_default(&self.path).await?;
        change(&mut state);
        write_json_atomic(&self.path, &state).await
    }

    async fn read(&self) -> Result<StateFile, StoreError> {
        let _guard = self.lock.lock().await;
        read_json_or_default(&self.path).await
    }
}

impl Default for JsonStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessedStore for JsonStateStore {
    async fn is_processed(&self, fingerprint: &str) -> Result<bool, StoreError> {
        Ok(self.read().await?.processed.contains_key(fingerprint))
    }

    async fn mark_processed(&self, fingerprint: &str, filename: &str) -> Result<(), StoreError> {
        let entry = ProcessedEntry {
            name: filename.to_string(),
            ts: Utc::now().timestamp_millis() as f64 / 1000.0,
        };
        self.update(|state| {
            state.processed.insert(fingerprint.to_string(), entry);
        })
        .await
    }

    async fn set_last_note(&self, note: &LastNote) -> Result<(), StoreError> {
        self.update(|state| {
            state.last_note_url = Some(note.url.clone());
            state.last_note_title = Some(note.title.clone());
            state.last_note_ts = Some(note.ts);
        })
        .await
    }

    async fn last_note(&self) -> Result<Option<LastNote>, StoreError> {
        let state = self.read().await?;
        Ok(state
            .last_note_url
            .filter(|url| !url.trim().is_empty())
            .map(|url| LastNote {
                url,
                title: state.last_note_title.unwrap_or_default(),
                ts: state.last_note_ts.unwrap_or_default(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn marks_and_remembers_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStateStore::with_path(dir.path().join("state.json"));

        assert!(!store.is_processed("abc").await.unwrap());
        store.mark_processed("abc", "IMG_1.jpg").await.unwrap();
        assert!(store.is_processed("abc").await.unwrap());

        let reopened = JsonStateStore::with_path(dir.path().join("state.json"));
        assert!(reopened.is_processed("abc").await.unwrap());
    }

    #[tokio::test]
    async fn last_note_round_trips_and_keeps_processed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStateStore::with_path(dir.path().join("state.json"));

        assert!(store.last_note().await.unwrap().is_none());

        store.mark_processed("abc", "a.jpg").await.unwrap();
        let note = LastNote {
            url: "https://www.notion.so/page#block".to_string(),
            title: "General".to_string(),
            ts: 1.5,
        };
        store.set_last_note(&note).await.unwrap();

        assert_eq!(store.last_note().await.unwrap(), Some(note));
        assert!(store.is_processed("abc").await.unwrap());
    }

    #[tokio::test]
    async fn reads_legacy_file_without_last_note() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"processed": {"fp": {"name": "a.jpg", "ts": 1.0}}}"#).unwrap();

        let store = JsonStateStore::with_path(&path);
        assert!(store.is_processed("fp").await.unwrap());
        assert!(store.last_note().await.unwrap().is_none());
    }
}
