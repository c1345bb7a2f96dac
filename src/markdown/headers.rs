//! Header extraction for page navigation.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use super::MarkdownRenderer;
use crate::utils::slug::slugify_with;

/// Levels extracted when a page does not configure its own.
pub const DEFAULT_HEADER_LEVELS: [HeadingLevel; 2] = [HeadingLevel::H2, HeadingLevel::H3];

/// A navigable section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain-text title.
    pub title: String,
    /// Anchor slug (`{#id}` when given, else the slugified title).
    pub slug: String,
}

/// Parse `"h2"` / `"H2"` into a heading level.
pub fn parse_heading_level(tag: &str) -> Option<HeadingLevel> {
    let digits = tag.strip_prefix(['h', 'H'])?;
    let level: usize = digits.parse().ok()?;
    HeadingLevel::try_from(level).ok()
}

/// Extract headers at `levels` from a markdown body, in document order.
pub fn extract_headers(body: &str, levels: &[HeadingLevel], renderer: &MarkdownRenderer) -> Vec<Header> {
    let mut headers = Vec::new();
    // (level, explicit id, collected text) of the heading being read.
    let mut current: Option<(HeadingLevel, Option<String>, String)> = None;

    for event in renderer.parser(body) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) if levels.contains(&level) => {
                current = Some((level, id.map(|id| id.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                if let Some((_, _, ref mut title)) = current {
                    title.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, ref mut title)) = current {
                    title.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, id, title)) = current.take() {
                    let title = title.trim().to_string();
                    let slug = id.unwrap_or_else(|| slugify_with(&title, renderer.slug_mode()));
                    headers.push(Header {
                        level: level as u8,
                        title,
                        slug,
                    });
                }
            }
            _ => {}
        }
    }

    headers
}
