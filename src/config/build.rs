//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "docs"                    # Page sources (relative to site root)
//! temp = ".temp"                      # Synthesized sources of inline pages
//! output = "pages.json"               # Page records, "-" for stdout
//! permalink = "/:year/:month/:slug"   # Fallback permalink pattern
//! headers = ["h2", "h3"]              # Heading levels collected per page
//! pre_render = false                  # Keep rendered body HTML
//! slug = "safe"                       # safe | full
//! ```

use std::path::PathBuf;

use pulldown_cmark::HeadingLevel;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::markdown::parse_heading_level;
use crate::utils::slug::SlugMode;

/// Output path meaning "write to stdout".
pub const STDOUT: &str = "-";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content directory.
    pub content: PathBuf,
    /// Temp directory.
    pub temp: PathBuf,
    /// Output file for page records.
    pub output: PathBuf,
    /// Permalink pattern used when a page sets none.
    pub permalink: Option<String>,
    /// Heading levels extracted into `headers`.
    pub headers: Vec<String>,
    /// Render each page body to HTML during processing.
    pub pre_render: bool,
    /// Slug mode for page slugs and header anchors.
    pub slug: SlugMode,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "docs".into(),
            temp: ".temp".into(),
            output: "pages.json".into(),
            permalink: None,
            headers: vec!["h2".into(), "h3".into()],
            pre_render: false,
            slug: SlugMode::default(),
        }
    }
}

impl BuildConfig {
    /// Parsed `headers` levels.
    pub fn header_levels(&self) -> Result<Vec<HeadingLevel>, ConfigError> {
        self.headers
            .iter()
            .map(|tag| {
                parse_heading_level(tag).ok_or_else(|| {
                    ConfigError::Validation(format!("build.headers: unknown heading level `{tag}`"))
                })
            })
            .collect()
    }

    /// Whether records go to stdout.
    pub fn is_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT
    }
}
