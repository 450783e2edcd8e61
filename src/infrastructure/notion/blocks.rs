//! Mapping of formatter blocks to the Notion block JSON shape

use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};

use crate::domain::notes::{Block, Span};

/// Wire type name of a block
pub fn block_type(block: &Block) -> &'static str {
    match block {
        Block::Heading { .. } => "heading_2",
        Block::SubHeading { .. } => "heading_3",
        Block::Paragraph { .. } => "paragraph",
        Block::Divider => "divider",
        Block::Image { .. } => "image",
        Block::ChecklistItem { .. } => "to_do",
        Block::BulletItem { .. } => "bulleted_list_item",
        Block::NumberedItem { .. } => "numbered_list_item",
    }
}

/// One block as a Notion `children` entry
pub fn to_notion(block: &Block) -> Value {
    let kind = block_type(block);
    let body = match block {
        Block::Divider => json!({}),
        Block::Image {
            attachment,
            caption,
        } => json!({
            "caption": [text(caption)],
            "type": "file_upload",
            "file_upload": { "id": attachment.as_str() },
        }),
        Block::ChecklistItem { checked, .. } => json!({
            "rich_text": rich_text(&block.spans()),
            "checked": checked,
        }),
        _ => json!({ "rich_text": rich_text(&block.spans()) }),
    };

    json!({
        "object": "block",
        "type": kind,
        kind: body,
    })
}

/// All blocks as a JSON array
pub fn to_notion_array(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(to_notion).collect())
}

fn rich_text(spans: &[Span]) -> Vec<Value> {
    spans
        .iter()
        .map(|span| match span {
            Span::DateMention(date) => date_mention(date),
            Span::Text(content) => text(content),
        })
        .collect()
}

fn text(content: &str) -> Value {
    json!({ "type": "text", "text": { "content": content } })
}

fn date_mention(date: &DateTime<FixedOffset>) -> Value {
    json!({
        "type": "mention",
        "mention": {
            "type": "date",
            "date": { "start": date.format("%Y-%m-%dT%H:%M%:z").to_string() },
        },
    })
}
