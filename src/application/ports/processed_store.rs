//! Processed-image state port interface

use async_trait::async_trait;
use thiserror::Error;

/// State storage errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

/// The most recently appended note
#[derive(Debug, Clone, PartialEq)]
pub struct LastNote {
    pub url: String,
    pub title: String,
    /// Unix timestamp in seconds
    pub ts: f64,
}

/// Port for remembering which photos were already appended
#[async_trait]
pub trait ProcessedStore: Send + Sync {
    /// True when the fingerprint was recorded before
    async fn is_processed(&self, fingerprint: &str) -> Result<bool, StoreError>;

    /// Record a fingerprint together with the source filename
    async fn mark_processed(&self, fingerprint: &str, filename: &str) -> Result<(), StoreError>;

    /// Remember the link to the note just written
    async fn set_last_note(&self, note: &LastNote) -> Result<(), StoreError>;

    /// Link to the note written last, if any
    async fn last_note(&self) -> Result<Option<LastNote>, StoreError>;
}
