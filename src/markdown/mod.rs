//! Markdown and component source support.
//!
//! - [`frontmatter`] - `---` / `+++` front matter and excerpt splitting
//! - [`component`] - `<frontmatter>` blocks of `.vue` components
//! - [`render`] - HTML rendering via `pulldown-cmark`
//! - [`headers`] - navigable header extraction

pub mod component;
pub mod frontmatter;
pub mod headers;
pub mod render;

pub use component::parse_component_frontmatter;
pub use frontmatter::{EXCERPT_MARKER, FrontmatterError, ParsedDocument, parse_document};
pub use headers::{DEFAULT_HEADER_LEVELS, Header, extract_headers, parse_heading_level};
pub use render::{MarkdownOptions, MarkdownRenderer, Rendered, inline_text};
