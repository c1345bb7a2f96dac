//! Metadata extraction from loaded source content.

use std::path::Path;

use serde_json::Value;

use super::meta::infer_title;
use super::{Frontmatter, Page, PageError};
use crate::debug;
use crate::markdown::{MarkdownRenderer, extract_headers, parse_component_frontmatter, parse_document};

/// Source format, by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// `.md` / `.markdown`
    Markdown,
    /// `.vue` single-file component
    Component,
}

impl ContentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "vue" => Some(Self::Component),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether `path` is a page source.
    pub fn is_page_file(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

impl Page {
    /// Derive front matter, title, headers and excerpt from the source.
    ///
    /// Does nothing when the page has no (or empty) source content, or when
    /// its source has an unknown extension. With `pre_render`, the whole
    /// body is also rendered to HTML and kept in [`Page::rendered`].
    pub fn extract_metadata(&mut self, renderer: &MarkdownRenderer, pre_render: bool) -> Result<(), PageError> {
        let Some(source) = self.source_content.take() else {
            return Ok(());
        };
        let result = self.extract_from(&source, renderer, pre_render);
        self.source_content = Some(source);
        result
    }

    fn extract_from(&mut self, source: &str, renderer: &MarkdownRenderer, pre_render: bool) -> Result<(), PageError> {
        if source.is_empty() {
            return Ok(());
        }

        let format = self.source_file_path.as_deref().and_then(ContentFormat::from_path);
        match format {
            Some(ContentFormat::Markdown) => self.extract_markdown(source, renderer, pre_render),
            Some(ContentFormat::Component) => self.extract_component(source),
            None => {
                debug!("page"; "skipping metadata of {}: unknown format", self.display_name());
                Ok(())
            }
        }
    }

    fn extract_markdown(&mut self, source: &str, renderer: &MarkdownRenderer, pre_render: bool) -> Result<(), PageError> {
        let parsed = parse_document(source).map_err(|source| self.frontmatter_error(source))?;

        self.stripped_content = Some(parsed.content.to_string());
        self.frontmatter = parsed.data;

        if let Some(title) = infer_title(&self.frontmatter, parsed.content, renderer) {
            self.title = Some(title);
        }

        let headers = extract_headers(parsed.content, &self.header_levels, renderer);
        if !headers.is_empty() {
            self.headers = Some(headers);
        }

        if let Some(excerpt) = parsed.excerpt {
            self.excerpt = Some(renderer.render(excerpt).html);
        }

        if pre_render {
            self.rendered = Some(renderer.render(parsed.content).html);
        }

        debug!(
            "page";
            "{}: title={:?}, {} headers",
            self.display_name(),
            self.title,
            self.headers.as_ref().map_or(0, Vec::len)
        );
        Ok(())
    }

    fn extract_component(&mut self, source: &str) -> Result<(), PageError> {
        let parsed = parse_component_frontmatter(source).map_err(|source| self.frontmatter_error(source))?;

        let mut frontmatter = Frontmatter::new();
        frontmatter.insert("layout".into(), Value::String(self.key.clone()));
        if let Some(data) = parsed {
            frontmatter.extend(data);
        }
        self.frontmatter = frontmatter;
        Ok(())
    }

    fn frontmatter_error(&self, source: crate::markdown::FrontmatterError) -> PageError {
        PageError::Frontmatter {
            page: self.display_name(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildContext;
    use crate::page::PageOptions;
    use serde_json::json;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn load(dir: &TempDir, name: &str, content: &str) -> Page {
        let file = dir.path().join(name);
        fs::write(&file, content).unwrap();
        let context = Arc::new(BuildContext::new(dir.path().join(".temp")));
        let mut page = Page::new(PageOptions::file(&file, name), context);
        page.resolve_source().await.unwrap();
        page
    }

    fn extract(page: &mut Page) {
        page.extract_metadata(&MarkdownRenderer::default(), false).unwrap();
    }

    #[test]
    fn test_content_format() {
        assert_eq!(ContentFormat::from_path(Path::new("a.md")), Some(ContentFormat::Markdown));
        assert_eq!(ContentFormat::from_path(Path::new("a.MARKDOWN")), Some(ContentFormat::Markdown));
        assert_eq!(ContentFormat::from_path(Path::new("a.vue")), Some(ContentFormat::Component));
        assert_eq!(ContentFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(ContentFormat::from_path(Path::new("README")), None);
    }

    #[tokio::test]
    async fn test_frontmatter_title_wins() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "---\ntitle: T\n---\n# Other\n").await;
        extract(&mut page);

        assert_eq!(page.title(), Some("T"));
        assert_eq!(page.frontmatter()["title"], json!("T"));
        assert_eq!(page.stripped_content(), Some("# Other\n"));
    }

    #[tokio::test]
    async fn test_nested_frontmatter_keeps_top_level_title() {
        let dir = TempDir::new().unwrap();
        let source = "---\ntitle: Real\nseo:\n  title: SEO Only\n  description: x\n---\n# Heading";
        let mut page = load(&dir, "a.md", source).await;
        extract(&mut page);

        assert_eq!(page.title(), Some("Real"));
        assert_eq!(page.frontmatter()["seo"]["title"], json!("SEO Only"));
        assert!(page.frontmatter().get("description").is_none());
    }

    #[tokio::test]
    async fn test_heading_title() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "# Hello\n\ntext").await;
        extract(&mut page);

        assert_eq!(page.title(), Some("Hello"));
        assert!(page.frontmatter().is_empty());
    }

    #[tokio::test]
    async fn test_constructor_title_kept_without_inferred_title() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "plain text").unwrap();

        let context = Arc::new(BuildContext::new(dir.path().join(".temp")));
        let options = PageOptions {
            title: Some("Given".into()),
            ..PageOptions::file(&file, "a.md")
        };
        let mut page = Page::new(options, context);
        page.resolve_source().await.unwrap();
        extract(&mut page);

        assert_eq!(page.title(), Some("Given"));
    }

    #[tokio::test]
    async fn test_headers_in_document_order() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "# T\n\n## One\n\n### Sub\n\n#### Deep\n\n## Two\n").await;
        extract(&mut page);

        let headers = page.headers().unwrap();
        let titles: Vec<_> = headers.iter().map(|h| (h.level, h.title.as_str())).collect();
        assert_eq!(titles, [(2, "One"), (3, "Sub"), (2, "Two")]);
        assert_eq!(headers[0].slug, "one");
    }

    #[tokio::test]
    async fn test_no_headers_is_none() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "# Only a title\n\nbody").await;
        extract(&mut page);

        assert!(page.headers().is_none());
        assert!(!page.to_json().unwrap().as_object().unwrap().contains_key("headers"));
    }

    #[tokio::test]
    async fn test_excerpt_is_rendered() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "Intro *here*\n\n<!-- more -->\n\nRest").await;
        extract(&mut page);

        assert_eq!(page.excerpt(), Some("<p>Intro <em>here</em></p>\n"));
        assert!(page.rendered().is_none());
    }

    #[tokio::test]
    async fn test_pre_render() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "---\ntitle: T\n---\nHello").await;
        page.extract_metadata(&MarkdownRenderer::default(), true).unwrap();

        assert_eq!(page.rendered(), Some("<p>Hello</p>\n"));
    }

    #[tokio::test]
    async fn test_malformed_frontmatter() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "a.md", "---\ntitle: T\n").await;
        let err = page
            .extract_metadata(&MarkdownRenderer::default(), false)
            .unwrap_err();

        assert!(matches!(err, PageError::Frontmatter { .. }));
        assert!(page.source_content().is_some());

        let mut page = load(&dir, "b.md", "---\ntitle: [T\n---\nBody").await;
        let err = page
            .extract_metadata(&MarkdownRenderer::default(), false)
            .unwrap_err();
        assert!(matches!(err, PageError::Frontmatter { .. }));
    }

    #[tokio::test]
    async fn test_component_layout_defaults_to_key() {
        let dir = TempDir::new().unwrap();
        let mut page = load(&dir, "Home.vue", "<template><div/></template>\n").await;
        extract(&mut page);

        assert_eq!(page.frontmatter()["layout"], json!(page.key()));
    }

    #[tokio::test]
    async fn test_component_frontmatter_merges() {
        let dir = TempDir::new().unwrap();
        let source = "<template/>\n<frontmatter>\ntitle: Home\nlayout: Wide\n</frontmatter>\n";
        let mut page = load(&dir, "Home.vue", source).await;
        extract(&mut page);

        assert_eq!(page.frontmatter()["title"], json!("Home"));
        assert_eq!(page.frontmatter()["layout"], json!("Wide"));
    }

    #[tokio::test]
    async fn test_unknown_format_is_skipped() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "---\ntitle: T\n---\n").unwrap();

        let context = Arc::new(BuildContext::new(dir.path().join(".temp")));
        let options = PageOptions {
            frontmatter: json!({ "kept": true }).as_object().cloned().unwrap(),
            ..PageOptions::file(&file, "notes.txt")
        };
        let mut page = Page::new(options, context);
        page.resolve_source().await.unwrap();
        extract(&mut page);

        assert!(page.title().is_none());
        assert_eq!(page.frontmatter()["kept"], json!(true));
    }

    #[test]
    fn test_route_page_is_untouched() {
        let context = Arc::new(BuildContext::new("/tmp/folio-test"));
        let mut page = Page::new(PageOptions::route("/nav/"), context);
        extract(&mut page);

        assert!(page.title().is_none());
        assert!(page.stripped_content().is_none());
    }
}
