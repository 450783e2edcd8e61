//! Notion page id value object

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::PageIdParseError;

const NOTION_BASE_URL: &str = "https://www.notion.so";

static HEX_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9a-fA-F]{32,}").expect("valid page id pattern"));

const ID_LEN: usize = 32;

/// Page id in dashed lowercase UUID form.
///
/// Accepts a full Notion URL (`https://www.notion.so/Notes-0123...?v=...`),
/// a dashed id or a bare 32-character hex id. The id ends the URL path, so
/// the last 32 hex characters win over hex-looking title words before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(String);

impl PageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id without dashes, as used in notion.so links
    pub fn compact(&self) -> String {
        self.0.replace('-', "")
    }

    /// Link to a page with a block fragment
    pub fn anchor_url(&self, block_id: &str) -> String {
        anchor_url(&self.0, block_id)
    }
}

impl FromStr for PageId {
    type Err = PageIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let without_query = s.trim().split('?').next().unwrap_or_default();
        let compact = without_query.replace('-', "");

        let run = HEX_RUN
            .find_iter(&compact)
            .last()
            .map(|m| m.as_str())
            .ok_or_else(|| PageIdParseError {
                input: s.to_string(),
            })?;
        let raw = run[run.len() - ID_LEN..].to_lowercase();

        Ok(Self(format!(
            "{}-{}-{}-{}-{}",
            &raw[0..8],
            &raw[8..12],
            &raw[12..16],
            &raw[16..20],
            &raw[20..32]
        )))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direct link to a block
pub fn block_url(block_id: &str) -> String {
    format!("{}/{}", NOTION_BASE_URL, block_id.replace('-', ""))
}

/// Link to a page scrolled to one of its blocks
pub fn anchor_url(page_id: &str, block_id: &str) -> String {
    format!(
        "{}/{}#{}",
        NOTION_BASE_URL,
        page_id.replace('-', ""),
        block_id.replace('-', "")
    )
}
