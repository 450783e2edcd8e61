//! Notion REST API adapter

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::application::ports::{AppendResult, CreatedBlock, DocumentError, DocumentService};
use crate::domain::notes::{AttachmentId, Block};
use crate::domain::notion::PageId;

use super::blocks::to_notion;

/// Notion API base URL
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// Notion API version header value
pub const NOTION_VERSION: &str = "2025-09-03";

/// Children fetched per page when searching for the anchor heading
const CHILDREN_PAGE_SIZE: u32 = 50;

/// Parent hops before giving up on page resolution
const MAX_PARENT_DEPTH: usize = 16;

// Response types

#[derive(Debug, Deserialize)]
struct BlockList {
    #[serde(default)]
    results: Vec<BlockRef>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockRef {
    id: String,
    #[serde(rename = "type", default)]
    block_type: String,
}

#[derive(Debug, Deserialize)]
struct BlockWithParent {
    parent: Option<Parent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Parent {
    PageId { page_id: String },
    BlockId { block_id: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct FileUpload {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Notion API client
pub struct NotionClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl NotionClient {
    /// Create a client for an integration token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at another endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, DocumentError> {
        let response = request
            .send()
            .await
            .map_err(|e| DocumentError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DocumentError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DocumentError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(DocumentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DocumentError::ParseError(e.to_string()))
    }

    /// One page of the children of a block
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<BlockList, DocumentError> {
        let mut query = vec![("page_size", CHILDREN_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor.to_string()));
        }

        let request = self
            .request(reqwest::Method::GET, &format!("blocks/{}/children", block_id))
            .query(&query);
        self.send(request, block_id).await
    }
}

#[async_trait]
impl DocumentService for NotionClient {
    async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<AttachmentId, DocumentError> {
        let create = self
            .request(reqwest::Method::POST, "file_uploads")
            .json(&json!({ "filename": filename, "content_type": content_type }));
        let upload: FileUpload = self.send(create, "file upload").await?;

        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| DocumentError::RequestFailed(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let send = self
            .request(
                reqwest::Method::POST,
                &format!("file_uploads/{}/send", upload.id),
            )
            .multipart(form);
        let sent: FileUpload = self.send(send, "file upload").await?;

        debug!(id = %sent.id, "image uploaded");
        Ok(AttachmentId::new(sent.id))
    }

    async fn find_first_heading_id(&self, page: &PageId) -> Result<Option<String>, DocumentError> {
        let mut cursor: Option<String> = None;

        loop {
            let list = self.list_children(page.as_str(), cursor.as_deref()).await?;

            if let Some(found) = list.results.iter().find(|b| b.block_type == "heading_1") {
                return Ok(Some(found.id.clone()));
            }

            match list.next_cursor {
                Some(next) if list.has_more => cursor = Some(next),
                _ => return Ok(None),
            }
        }
    }

    async fn append_children(
        &self,
        parent: &PageId,
        blocks: &[Block],
        after: Option<&str>,
    ) -> Result<AppendResult, DocumentError> {
        let children: Vec<_> = blocks.iter().map(to_notion).collect();
        let mut body = json!({ "children": children });
        if let Some(after) = after {
            body["after"] = json!(after);
        }

        let request = self
            .request(
                reqwest::Method::PATCH,
                &format!("blocks/{}/children", parent.as_str()),
            )
            .json(&body);
        let list: BlockList = self.send(request, parent.as_str()).await?;

        Ok(AppendResult {
            blocks: list
                .results
                .into_iter()
                .map(|b| CreatedBlock {
                    id: b.id,
                    block_type: b.block_type,
                })
                .collect(),
        })
    }

    async fn resolve_page_id(&self, block_id: &str) -> Result<Option<PageId>, DocumentError> {
        let mut current = block_id.to_string();

        for _ in 0..MAX_PARENT_DEPTH {
            let request = self.request(reqwest::Method::GET, &format!("blocks/{}", current));
            let block: BlockWithParent = self.send(request, &current).await?;

            match block.parent {
                Some(Parent::PageId { page_id }) => return Ok(page_id.parse().ok()),
                Some(Parent::BlockId { block_id }) => current = block_id,
                Some(Parent::Other) | None => return Ok(None),
            }
        }

        Ok(None)
    }
}
