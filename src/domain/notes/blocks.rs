//! Presentation blocks produced by the note formatter
//!
//! Blocks are workspace-agnostic; the Notion adapter maps them to its wire
//! format.

use std::fmt;

use chrono::{DateTime, FixedOffset};

/// Opaque handle of an uploaded image in the document workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentId(String);

impl AttachmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inline piece of rich text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Workspace-native date reference
    DateMention(DateTime<FixedOffset>),
    Text(String),
}

/// Discriminator of a [`Block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    SubHeading,
    Paragraph,
    Divider,
    Image,
    ChecklistItem,
    BulletItem,
    NumberedItem,
}

/// A single rendered block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Entry heading: date mention, then an em-dash and the entry title
    Heading {
        date: DateTime<FixedOffset>,
        title: String,
    },
    /// Topic heading inside an entry
    SubHeading { text: String },
    Paragraph { text: String },
    Divider,
    Image {
        attachment: AttachmentId,
        caption: String,
    },
    ChecklistItem { text: String, checked: bool },
    BulletItem { text: String },
    NumberedItem { text: String },
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading { .. } => BlockKind::Heading,
            Self::SubHeading { .. } => BlockKind::SubHeading,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::Divider => BlockKind::Divider,
            Self::Image { .. } => BlockKind::Image,
            Self::ChecklistItem { .. } => BlockKind::ChecklistItem,
            Self::BulletItem { .. } => BlockKind::BulletItem,
            Self::NumberedItem { .. } => BlockKind::NumberedItem,
        }
    }

    /// Rich text of the block. Dividers have none; images carry their caption.
    pub fn spans(&self) -> Vec<Span> {
        match self {
            Self::Heading { date, title } => vec![
                Span::DateMention(*date),
                Span::Text(format!(" — {}", title)),
            ],
            Self::Divider => Vec::new(),
            Self::Image { caption, .. } => vec![Span::Text(caption.clone())],
            Self::SubHeading { text }
            | Self::Paragraph { text }
            | Self::ChecklistItem { text, .. }
            | Self::BulletItem { text }
            | Self::NumberedItem { text } => vec![Span::Text(text.clone())],
        }
    }

    /// Plain text content, if the block has a single text payload
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::SubHeading { text }
            | Self::Paragraph { text }
            | Self::ChecklistItem { text, .. }
            | Self::BulletItem { text }
            | Self::NumberedItem { text } => Some(text),
            Self::Heading { title, .. } => Some(title),
            Self::Image { caption, .. } => Some(caption),
            Self::Divider => None,
        }
    }
}
