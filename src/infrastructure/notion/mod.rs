//! Notion workspace adapter

mod blocks;
mod client;

pub use blocks::{block_type, to_notion, to_notion_array};
pub use client::{NotionClient, NOTION_VERSION};
