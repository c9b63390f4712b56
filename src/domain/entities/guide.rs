//! Guide entity - Long-form travel writing
//!
//! Guide bodies are structured rich text: an ordered list of nodes, each
//! either a text block made of spans or an embedded image.

use serde::{Deserialize, Serialize};

use super::RegionRef;
use crate::domain::value_objects::{ImageRef, Slug};

/// A travel guide with its full body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guide {
    pub slug: Slug,
    pub title: String,
    pub body: Vec<BodyNode>,
    pub region: Option<RegionRef>,
}

/// Guide listing entry, without the body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideSummary {
    pub slug: Slug,
    pub title: String,
    pub region: Option<RegionRef>,
}

impl From<&Guide> for GuideSummary {
    fn from(guide: &Guide) -> Self {
        Self {
            slug: guide.slug.clone(),
            title: guide.title.clone(),
            region: guide.region.clone(),
        }
    }
}

/// One node of a guide body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyNode {
    Block(TextBlock),
    Image(ImageRef),
}

/// A paragraph, heading, quote or list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub style: BlockStyle,
    pub list: Option<ListKind>,
    pub spans: Vec<Span>,
}

impl TextBlock {
    /// Concatenated text of all spans
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStyle {
    Normal,
    H1,
    H2,
    H3,
    Blockquote,
}

impl BlockStyle {
    /// Unknown styles render as plain paragraphs
    pub fn from_name(name: &str) -> Self {
        match name {
            "h1" => BlockStyle::H1,
            "h2" => BlockStyle::H2,
            "h3" => BlockStyle::H3,
            "blockquote" => BlockStyle::Blockquote,
            _ => BlockStyle::Normal,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, BlockStyle::H1 | BlockStyle::H2 | BlockStyle::H3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bullet,
    Number,
}

/// A run of text with decorators and an optional link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    /// Decorators such as `strong` or `em`
    pub decorators: Vec<String>,
    pub link: Option<String>,
}

#[cfg(test)]
impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            decorators: Vec::new(),
            link: None,
        }
    }
}
