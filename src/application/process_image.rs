//! Process image use case
//!
//! One photo in, one dated entry (or several) appended to the Notion page.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::notes::{build_blocks, AttachmentId, Block};
use crate::domain::notice::{success_body, NOTE_ADDED_TITLE};
use crate::domain::notion::{block_url, PageId};
use crate::domain::transcription::TranscriptionPrompt;
use crate::domain::usage::UsageEvent;

use super::ports::{
    AppendResult, DocumentError, DocumentService, ImageError, ImageSource, LastNote,
    NotificationIcon, Notifier, ProcessedStore, StoreError, TokenUsage, Transcriber,
    TranscriptionError, UsageLog,
};

/// Maximum number of blocks per append request
pub const APPEND_CHUNK_SIZE: usize = 60;

/// Pause between two append requests
pub const APPEND_CHUNK_DELAY: Duration = Duration::from_millis(100);

/// Errors from the process image use case
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Notion error: {0}")]
    Document(#[from] DocumentError),

    #[error("State error: {0}")]
    Store(#[from] StoreError),

    #[error("Path has no file name: {0}")]
    InvalidPath(String),
}

/// Output of a successful append
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub filename: String,
    /// Title of the first entry written
    pub title: String,
    /// Link to the first entry heading, when the workspace returned one
    pub url: Option<String>,
    pub block_count: usize,
    pub chunk_count: usize,
    pub usage: TokenUsage,
    /// Whether the photo itself was attached
    pub image_attached: bool,
}

/// Result of one `process` call
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    Appended(ProcessOutput),
    /// Same bytes were appended before
    AlreadyProcessed,
    /// Same bytes are being appended right now
    InFlight,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct ProcessCallbacks {
    /// Called with the filename before the model call
    pub on_transcribing_start: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called with the filename before the image upload
    pub on_uploading_start: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called with (filename, block count) before the first append
    pub on_appending_start: Option<Box<dyn Fn(&str, usize) + Send + Sync>>,
}

/// Fingerprints currently being processed
#[derive(Debug, Default, Clone)]
struct InFlight(Arc<Mutex<HashSet<String>>>);

impl InFlight {
    /// Claim a fingerprint; `None` when someone else holds it
    fn claim(&self, fingerprint: &str) -> Option<InFlightGuard> {
        let mut set = self.0.lock().unwrap_or_else(|e| e.into_inner());
        if set.insert(fingerprint.to_string()) {
            Some(InFlightGuard {
                set: self.clone(),
                fingerprint: fingerprint.to_string(),
            })
        } else {
            None
        }
    }
}

struct InFlightGuard {
    set: InFlight,
    fingerprint: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.set.0.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.fingerprint);
    }
}

/// Append cursor for the chunk following `result`.
///
/// Notion returns the created blocks in request order, so the next chunk
/// goes after the last of them.
pub fn next_cursor(result: &AppendResult, current: Option<String>) -> Option<String> {
    result.last_id().map(str::to_string).or(current)
}

/// Photo-to-Notion use case
pub struct ProcessImageUseCase<I, T, D, S, U, N>
where
    I: ImageSource,
    T: Transcriber,
    D: DocumentService,
    S: ProcessedStore,
    U: UsageLog,
    N: Notifier,
{
    images: I,
    transcriber: T,
    document: D,
    store: S,
    usage: U,
    notifier: N,
    page: PageId,
    model: String,
    prompt: TranscriptionPrompt,
    chunk_delay: Duration,
    in_flight: InFlight,
}

impl<I, T, D, S, U, N> ProcessImageUseCase<I, T, D, S, U, N>
where
    I: ImageSource,
    T: Transcriber,
    D: DocumentService,
    S: ProcessedStore,
    U: UsageLog,
    N: Notifier,
{
    /// Create a new use case instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        images: I,
        transcriber: T,
        document: D,
        store: S,
        usage: U,
        notifier: N,
        page: PageId,
        model: impl Into<String>,
    ) -> Self {
        Self {
            images,
            transcriber,
            document,
            store,
            usage,
            notifier,
            page,
            model: model.into(),
            prompt: TranscriptionPrompt::notes(),
            chunk_delay: APPEND_CHUNK_DELAY,
            in_flight: InFlight::default(),
        }
    }

    /// Override the pause between append requests
    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Get the notifier, for notices sent outside a successful run
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run the whole pipeline for one photo
    pub async fn process(
        &self,
        path: &Path,
        callbacks: &ProcessCallbacks,
    ) -> Result<ProcessOutcome, ProcessError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ProcessError::InvalidPath(path.display().to_string()))?;

        let fingerprint = self.images.fingerprint(path).await?;

        if self.store.is_processed(&fingerprint).await? {
            info!(file = %filename, "already processed");
            return Ok(ProcessOutcome::AlreadyProcessed);
        }

        let Some(_guard) = self.in_flight.claim(&fingerprint) else {
            debug!(file = %filename, "already in flight");
            return Ok(ProcessOutcome::InFlight);
        };

        // A concurrent run may have finished between the check and the claim
        if self.store.is_processed(&fingerprint).await? {
            info!(file = %filename, "processed while waiting to claim");
            return Ok(ProcessOutcome::AlreadyProcessed);
        }

        let image = self.images.load_jpeg(path).await?;
        debug!(file = %filename, size = %image.human_readable_size(), "image loaded");

        if let Some(ref cb) = callbacks.on_transcribing_start {
            cb(&filename);
        }
        info!(file = %filename, model = %self.model, "transcribing");
        let transcription = self.transcriber.transcribe(&image, &self.prompt).await?;

        self.record_usage(&filename, &transcription.model, transcription.usage)
            .await;

        if let Some(ref cb) = callbacks.on_uploading_start {
            cb(&filename);
        }
        let attachment = self.upload(&filename, image.into_data()).await;

        let anchor = self.document.find_first_heading_id(&self.page).await?;
        if anchor.is_none() {
            debug!("no heading on page; appending at the end");
        }

        let blocks = build_blocks(&transcription.notes, &filename, attachment.as_ref(), now());
        let title = first_heading_title(&blocks).unwrap_or_default();

        if let Some(ref cb) = callbacks.on_appending_start {
            cb(&filename, blocks.len());
        }
        info!(file = %filename, blocks = blocks.len(), "appending");
        let (first_result, chunk_count) = self.append_chunked(&blocks, anchor).await?;

        self.store.mark_processed(&fingerprint, &filename).await?;

        let url = match first_result.as_ref().and_then(AppendResult::first_heading_id) {
            Some(block_id) => Some(self.note_url(block_id).await),
            None => None,
        };

        if let Some(ref url) = url {
            let last = LastNote {
                url: url.clone(),
                title: title.clone(),
                ts: unix_now(),
            };
            if let Err(e) = self.store.set_last_note(&last).await {
                warn!(error = %e, "failed to store last note");
            }
        }

        if let Err(e) = self
            .notifier
            .notify(
                NOTE_ADDED_TITLE,
                &success_body(&title, &filename),
                NotificationIcon::Success,
            )
            .await
        {
            warn!(error = %e, "notification failed");
        }

        info!(file = %filename, chunks = chunk_count, "done");

        Ok(ProcessOutcome::Appended(ProcessOutput {
            filename,
            title,
            url,
            block_count: blocks.len(),
            chunk_count,
            usage: transcription.usage,
            image_attached: attachment.is_some(),
        }))
    }

    async fn record_usage(&self, filename: &str, model: &str, usage: TokenUsage) {
        let model = if model.is_empty() { &self.model } else { model };
        let event = UsageEvent {
            ts: unix_now(),
            model: model.to_string(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            filename: filename.to_string(),
        };
        if let Err(e) = self.usage.append(event).await {
            warn!(error = %e, "failed to record usage");
        }
    }

    /// Upload failures are logged and the entry falls back to a text source line.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Option<AttachmentId> {
        match self
            .document
            .upload_image(filename, bytes, "image/jpeg")
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(file = %filename, error = %e, "image upload failed; continuing without image");
                None
            }
        }
    }

    /// Append in fixed-size chunks, keeping block order across chunks.
    async fn append_chunked(
        &self,
        blocks: &[Block],
        anchor: Option<String>,
    ) -> Result<(Option<AppendResult>, usize), ProcessError> {
        let mut cursor = anchor;
        let mut first = None;
        let mut count = 0;

        for (idx, chunk) in blocks.chunks(APPEND_CHUNK_SIZE).enumerate() {
            if idx > 0 && !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }

            let result = self
                .document
                .append_children(&self.page, chunk, cursor.as_deref())
                .await?;
            debug!(chunk = idx, created = result.blocks.len(), "chunk appended");

            cursor = next_cursor(&result, cursor);
            if first.is_none() {
                first = Some(result);
            }
            count += 1;
        }

        Ok((first, count))
    }

    /// Page anchor link for a block; a plain block link when the page
    /// cannot be resolved.
    async fn note_url(&self, block_id: &str) -> String {
        match self.document.resolve_page_id(block_id).await {
            Ok(Some(page)) => page.anchor_url(block_id),
            Ok(None) => self.page.anchor_url(block_id),
            Err(e) => {
                warn!(error = %e, "could not resolve page of new block");
                block_url(block_id)
            }
        }
    }
}

fn first_heading_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Heading { title, .. } => Some(title.clone()),
        _ => None,
    })
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
