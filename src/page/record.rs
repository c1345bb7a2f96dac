//! The page record and its identity.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pulldown_cmark::HeadingLevel;
use serde::Serialize;

use super::{Frontmatter, PageSource};
use crate::core::BuildContext;
use crate::core::locale::ROOT_LOCALE;
use crate::core::url::{encode_uri, file_to_route, normalize_uri, route_stem};
use crate::markdown::{DEFAULT_HEADER_LEVELS, Header};
use crate::utils::date::{infer_date, strip_date_prefix};
use crate::utils::hash;
use crate::utils::slug::slugify_with;

/// Constructor inputs of a [`Page`].
///
/// At most one of `relative`, `path` and `permalink` is normally given;
/// when several are, the regular path is derived from the first non-empty
/// one in that order.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Explicit route path (e.g. `/about/`).
    pub path: Option<String>,
    /// Opaque metadata carried for the orchestrator (not serialized).
    pub meta: Option<Frontmatter>,
    pub title: Option<String>,
    /// Inline source, used when no `file_path` is given.
    pub content: Option<String>,
    /// Absolute path of the backing source file.
    pub file_path: Option<PathBuf>,
    /// Source path relative to the content root (e.g. `guide/intro.md`).
    pub relative: Option<String>,
    /// Explicit permalink; disables pattern-based permalinks.
    pub permalink: Option<String>,
    pub frontmatter: Frontmatter,
    /// Fallback permalink pattern when front matter has none.
    pub permalink_pattern: Option<String>,
    /// Heading levels collected into `headers` (default: h2, h3).
    pub header_levels: Option<Vec<HeadingLevel>>,
}

impl PageOptions {
    /// Options for a file under the content root.
    pub fn file(file_path: impl Into<PathBuf>, relative: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
            relative: Some(relative.into()),
            ..Default::default()
        }
    }

    /// Options for an in-memory page served at `path`.
    pub fn inline(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Options for a route with no content.
    pub fn route(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }
}

/// One content unit of the site.
///
/// Serializes (see [`Page::to_json`]) to its public shape only:
/// `key`, `regularPath`, `relativePath`, `path`, `title`, `frontmatter`,
/// `headers`, `excerpt`. Absent optional fields are omitted, which keeps
/// "no headers" distinct from "empty headers".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub(crate) key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) regular_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) relative_path: Option<String>,
    pub(crate) path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    pub(crate) frontmatter: Frontmatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) headers: Option<Vec<Header>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) excerpt: Option<String>,

    // === Internal working state ===
    #[serde(skip)]
    pub(crate) meta: Option<Frontmatter>,
    #[serde(skip)]
    pub(crate) source: PageSource,
    #[serde(skip)]
    pub(crate) source_file_path: Option<PathBuf>,
    #[serde(skip)]
    pub(crate) source_content: Option<String>,
    #[serde(skip)]
    pub(crate) stripped_content: Option<String>,
    #[serde(skip)]
    pub(crate) rendered: Option<String>,
    #[serde(skip)]
    pub(crate) permalink: Option<String>,
    #[serde(skip)]
    pub(crate) permalink_pattern: Option<String>,
    #[serde(skip)]
    pub(crate) header_levels: Vec<HeadingLevel>,
    #[serde(skip)]
    pub(crate) locale_path: String,
    #[serde(skip)]
    pub(crate) lang: Option<String>,
    #[serde(skip)]
    pub(crate) context: Arc<BuildContext>,
}

impl Page {
    /// Establish page identity. Performs no I/O.
    pub fn new(options: PageOptions, context: Arc<BuildContext>) -> Self {
        let PageOptions {
            path,
            meta,
            title,
            content,
            file_path,
            relative,
            permalink,
            frontmatter,
            permalink_pattern,
            header_levels,
        } = options;

        let relative = non_empty(relative);
        let permalink = non_empty(permalink).map(|p| normalize_uri(&p));

        let regular_path = relative
            .as_deref()
            .map(file_to_route)
            .or_else(|| non_empty(path))
            .map(|p| encode_uri(&p))
            .or_else(|| permalink.clone());

        let source = PageSource::from_options(file_path, content);
        let source_file_path = source.file_path().map(Path::to_path_buf);
        let key = hash::page_key(source_file_path.as_deref(), regular_path.as_deref());

        Self {
            key,
            path: regular_path.clone().unwrap_or_default(),
            regular_path,
            relative_path: relative,
            title,
            frontmatter,
            headers: None,
            excerpt: None,
            meta,
            source,
            source_file_path,
            source_content: None,
            stripped_content: None,
            rendered: None,
            permalink,
            permalink_pattern: non_empty(permalink_pattern),
            header_levels: header_levels.unwrap_or_else(|| DEFAULT_HEADER_LEVELS.to_vec()),
            locale_path: ROOT_LOCALE.to_string(),
            lang: None,
            context,
        }
    }

    // === Public fields ===

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn regular_path(&self) -> Option<&str> {
        self.regular_path.as_deref()
    }

    pub fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    /// Public path: the permalink once resolved, else the regular path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    pub fn headers(&self) -> Option<&[Header]> {
        self.headers.as_deref()
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    // === Internal state ===

    pub fn meta(&self) -> Option<&Frontmatter> {
        self.meta.as_ref()
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    pub fn source_file_path(&self) -> Option<&Path> {
        self.source_file_path.as_deref()
    }

    pub fn source_content(&self) -> Option<&str> {
        self.source_content.as_deref()
    }

    pub fn stripped_content(&self) -> Option<&str> {
        self.stripped_content.as_deref()
    }

    /// Full body HTML, when processed with `pre_render`.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn permalink(&self) -> Option<&str> {
        self.permalink.as_deref()
    }

    pub fn locale_path(&self) -> &str {
        &self.locale_path
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    // === Derived ===

    /// Base name without extension of the source file, else of the regular path.
    pub fn filename(&self) -> String {
        if let Some(stem) = self.source_file_path.as_deref().and_then(Path::file_stem) {
            return stem.to_string_lossy().into_owned();
        }
        self.regular_path.as_deref().map(route_stem).unwrap_or_default()
    }

    /// [`Self::filename`] without a `yyyy-MM-dd-` / `yyyy-MM-` prefix.
    pub fn stripped_filename(&self) -> String {
        strip_date_prefix(&self.filename()).to_string()
    }

    pub fn slug(&self) -> String {
        slugify_with(&self.stripped_filename(), self.context.slug_mode)
    }

    /// Date from front matter `date`, else from the file name prefix.
    pub fn date(&self) -> Option<String> {
        infer_date(&self.frontmatter, &self.filename())
    }

    /// Human-readable location for diagnostics.
    pub fn display_name(&self) -> String {
        if let Some(path) = &self.source_file_path {
            return path.display().to_string();
        }
        match &self.regular_path {
            Some(regular) => regular.clone(),
            None => self.key.clone(),
        }
    }

    /// Serialize the public fields only.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
