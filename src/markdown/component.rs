//! Front matter embedded in single-file components.
//!
//! A `.vue` page declares its metadata in a top-level custom block:
//!
//! ```text
//! <template>...</template>
//!
//! <frontmatter>
//! title: Home
//! </frontmatter>
//! ```
//!
//! `<frontmatter lang="toml">` switches the block to TOML.

use std::sync::LazyLock;

use regex::Regex;

use super::frontmatter::{BlockSyntax, FrontmatterError, parse_block};
use crate::page::Frontmatter;

static FRONTMATTER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<frontmatter(?P<attrs>\s[^>]*)?>(?P<body>.*?)</frontmatter\s*>"#).unwrap()
});

static LANG_TOML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\blang\s*=\s*["']?toml["']?"#).unwrap());

/// Parse the `<frontmatter>` block of a component, if it has one.
pub fn parse_component_frontmatter(source: &str) -> Result<Option<Frontmatter>, FrontmatterError> {
    let Some(caps) = FRONTMATTER_BLOCK.captures(source) else {
        return Ok(None);
    };

    let is_toml = caps
        .name("attrs")
        .is_some_and(|attrs| LANG_TOML.is_match(attrs.as_str()));
    let syntax = if is_toml {
        BlockSyntax::Toml
    } else {
        BlockSyntax::Yaml
    };

    let body = caps.name("body").map_or("", |m| m.as_str());
    parse_block(body.trim(), syntax).map(Some)
}
