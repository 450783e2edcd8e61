//! Document workspace port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notes::{AttachmentId, Block};
use crate::domain::notion::PageId;

/// Document service errors
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error("Invalid Notion token")]
    Unauthorized,

    #[error("Notion object not found: {0}")]
    NotFound(String),

    #[error("Notion request failed: {0}")]
    RequestFailed(String),

    #[error("Notion API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected Notion response: {0}")]
    ParseError(String),
}

/// A block created by an append call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBlock {
    pub id: String,
    /// Wire block type, e.g. `heading_2`
    pub block_type: String,
}

/// Blocks created by one append call, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendResult {
    pub blocks: Vec<CreatedBlock>,
}

impl AppendResult {
    /// Id of the first entry heading, or of the first block when none
    pub fn first_heading_id(&self) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.block_type == "heading_2")
            .or_else(|| self.blocks.first())
            .map(|b| b.id.as_str())
    }

    /// Id of the last created block
    pub fn last_id(&self) -> Option<&str> {
        self.blocks.last().map(|b| b.id.as_str())
    }
}

/// Port for the document workspace the notes are written to
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Upload an image so blocks can reference it.
    async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<AttachmentId, DocumentError>;

    /// Id of the first top-level H1 on the page, if any.
    async fn find_first_heading_id(&self, page: &PageId) -> Result<Option<String>, DocumentError>;

    /// Append blocks under `parent`, directly after the `after` block when
    /// given, at the end otherwise.
    async fn append_children(
        &self,
        parent: &PageId,
        blocks: &[Block],
        after: Option<&str>,
    ) -> Result<AppendResult, DocumentError>;

    /// Walk the parents of a block up to its page.
    async fn resolve_page_id(&self, block_id: &str) -> Result<Option<PageId>, DocumentError>;
}
