//! Note formatter: parsed transcription to an ordered list of blocks
//!
//! Pure and deterministic. No I/O, no clock, no randomness; `now` is an
//! input so identical inputs always give identical output.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use super::blocks::{AttachmentId, Block};
use super::parsed::ParsedNotes;
use super::sections::{build_sections, Section};

/// Glyph in front of every rendered question
pub const QUESTION_GLYPH: &str = "❓";

static NUMBERED_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\d+\.\s+(.*)$").expect("valid numbered note pattern"));

/// Format a parsed transcription into blocks.
///
/// `filename` only feeds the source caption. When `attachment` is given the
/// first entry shows the image, otherwise a `Source:` paragraph.
pub fn build_blocks(
    parsed: &ParsedNotes,
    filename: &str,
    attachment: Option<&AttachmentId>,
    now: DateTime<FixedOffset>,
) -> Vec<Block> {
    let sections = build_sections(&parsed.topics);
    render_blocks(&sections, filename, attachment, now)
}

/// Render already-grouped sections in a single forward pass.
pub fn render_blocks(
    sections: &[Section],
    filename: &str,
    attachment: Option<&AttachmentId>,
    now: DateTime<FixedOffset>,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    for (idx, section) in sections.iter().enumerate() {
        blocks.push(Block::Heading {
            date: now,
            title: section.title.clone(),
        });

        if idx == 0 {
            blocks.push(source_block(filename, attachment));
        }

        blocks.push(Block::Divider);

        for bucket in &section.topics {
            blocks.push(Block::SubHeading {
                text: bucket.title.clone(),
            });

            blocks.extend(bucket.tasks.iter().map(|task| Block::ChecklistItem {
                text: task.text.clone(),
                checked: task.done,
            }));

            blocks.extend(bucket.notes.iter().map(|note| note_block(note)));

            blocks.extend(bucket.questions.iter().map(|question| Block::BulletItem {
                text: format!("{} {}", QUESTION_GLYPH, question),
            }));
        }
    }

    blocks
}

fn source_block(filename: &str, attachment: Option<&AttachmentId>) -> Block {
    match attachment {
        Some(id) => Block::Image {
            attachment: id.clone(),
            caption: format!("Source image: {}", filename),
        },
        None => Block::Paragraph {
            text: format!("Source: {}", filename),
        },
    }
}

fn note_block(note: &str) -> Block {
    match NUMBERED_NOTE.captures(note).and_then(|caps| caps.get(1)) {
        Some(text) => Block::NumberedItem {
            text: text.as_str().to_string(),
        },
        None => Block::BulletItem {
            text: note.to_string(),
        },
    }
}
