//! Front matter parsing for Markdown sources.
//!
//! Two block styles are recognized at the very start of a document:
//!
//! ```text
//! ---                 +++
//! title: Hello        title = "Hello"
//! tags: [a, b]        tags = ["a", "b"]
//! ---                 +++
//! ```
//!
//! An excerpt is the body text before the first [`EXCERPT_MARKER`].

use pulldown_cmark::{Event, Parser};
use serde_json::Value;
use thiserror::Error;

use crate::page::Frontmatter;

/// Separates the excerpt from the rest of the body.
pub const EXCERPT_MARKER: &str = "<!-- more -->";

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

/// Front matter parse failure.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML front matter")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter")]
    Toml(#[from] toml::de::Error),

    #[error("front matter is not a key/value mapping")]
    NotAMapping,

    #[error("front matter opened with `{0}` is never closed")]
    Unclosed(&'static str),
}

/// Block syntax of a front matter section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSyntax {
    /// YAML mapping.
    Yaml,
    /// TOML table.
    Toml,
}

/// Result of splitting a document into front matter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument<'a> {
    /// Front matter data (empty when the document has none).
    pub data: Frontmatter,
    /// Body after the front matter block.
    pub content: &'a str,
    /// Body text before [`EXCERPT_MARKER`], if the marker is present.
    pub excerpt: Option<&'a str>,
}

/// Split a Markdown document into front matter data, body and excerpt.
pub fn parse_document(source: &str) -> Result<ParsedDocument<'_>, FrontmatterError> {
    let (data, content) = match detect_frontmatter(source)? {
        Some((block, body, syntax)) => (parse_block(block, syntax)?, body),
        None => (Frontmatter::new(), source.strip_prefix('\u{feff}').unwrap_or(source)),
    };

    let excerpt = find_excerpt_marker(content)
        .map(|idx| content[..idx].trim())
        .filter(|excerpt| !excerpt.is_empty());

    Ok(ParsedDocument {
        data,
        content,
        excerpt,
    })
}

/// Byte offset of the first [`EXCERPT_MARKER`] written as HTML.
///
/// A marker inside code is text, not HTML, and is skipped.
fn find_excerpt_marker(content: &str) -> Option<usize> {
    if !content.contains(EXCERPT_MARKER) {
        return None;
    }
    Parser::new(content)
        .into_offset_iter()
        .find_map(|(event, range)| match event {
            Event::Html(html) | Event::InlineHtml(html) if html.trim() == EXCERPT_MARKER => Some(range.start),
            _ => None,
        })
}

/// Parse the inside of a front matter block.
pub fn parse_block(block: &str, syntax: BlockSyntax) -> Result<Frontmatter, FrontmatterError> {
    match syntax {
        BlockSyntax::Yaml => parse_yaml(block),
        BlockSyntax::Toml => parse_toml(block),
    }
}

/// Detect and extract front matter.
/// Returns `(block, body, syntax)` if found.
fn detect_frontmatter(content: &str) -> Result<Option<(&str, &str, BlockSyntax)>, FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (fence, syntax) in [(YAML_FENCE, BlockSyntax::Yaml), (TOML_FENCE, BlockSyntax::Toml)] {
        let Some(rest) = content.strip_prefix(fence) else {
            continue;
        };
        // The opening fence must be alone on its line.
        if !rest.starts_with('\n') && !rest.starts_with("\r\n") {
            continue;
        }

        let Some((block, body)) = split_closing_fence(rest, fence) else {
            return Err(FrontmatterError::Unclosed(fence));
        };
        return Ok(Some((block.trim(), body, syntax)));
    }

    Ok(None)
}

/// Find the closing fence line in `rest`, returning (block, body).
fn split_closing_fence<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let body = &rest[offset + line.len()..];
            return Some((&rest[..offset], body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    None
}

/// Parse YAML front matter. The block must be a mapping (or empty).
fn parse_yaml(content: &str) -> Result<Frontmatter, FrontmatterError> {
    if content.trim().is_empty() {
        return Ok(Frontmatter::new());
    }
    match serde_yaml::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Frontmatter::new()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Parse TOML front matter.
fn parse_toml(content: &str) -> Result<Frontmatter, FrontmatterError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// Convert TOML to JSON; datetimes become their RFC 3339 string.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
