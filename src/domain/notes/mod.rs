//! Handwritten note structure
//!
//! Turns the model's loosely structured JSON into presentation blocks:
//! lenient decoding, line reclassification, section grouping and rendering.

mod blocks;
mod classify;
mod format;
mod parsed;
mod sections;

pub use blocks::{AttachmentId, Block, BlockKind, Span};
pub use classify::{classify, clean_question, ClassifiedLine, LineKind, LEAKED_BULLET_GLYPHS};
pub use format::{build_blocks, render_blocks, QUESTION_GLYPH};
pub use parsed::{ParsedNotes, Task, Topic, DEFAULT_TOPIC_TITLE};
pub use sections::{build_sections, Section, TopicBucket, FALLBACK_SECTION_TITLE};
