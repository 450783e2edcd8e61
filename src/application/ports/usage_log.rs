//! Usage log port interface

use async_trait::async_trait;

use super::processed_store::StoreError;
use crate::domain::usage::UsageEvent;

/// Port for the append-only token usage log
#[async_trait]
pub trait UsageLog: Send + Sync {
    async fn append(&self, event: UsageEvent) -> Result<(), StoreError>;

    /// All recorded events; a missing or unreadable log yields none
    async fn load(&self) -> Result<Vec<UsageEvent>, StoreError>;
}
