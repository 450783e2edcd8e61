//! Notion workspace references

mod page_id;

pub use page_id::{anchor_url, block_url, PageId};
