//! Source resolution: loading page content.

use super::{Page, PageError, PageSource};
use crate::debug;

impl Page {
    /// Load the page's source content.
    ///
    /// - file pages read their backing file
    /// - inline pages get a temp file at `<temp>/temp-pages/<key>.md`, which
    ///   then serves as `source_file_path`
    /// - route-only pages have nothing to load
    pub async fn resolve_source(&mut self) -> Result<(), PageError> {
        match &self.source {
            PageSource::File { path } => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| PageError::Read {
                        path: path.clone(),
                        source,
                    })?;
                self.source_content = Some(content);
            }
            PageSource::Inline { content } => {
                let path = self
                    .context
                    .write_temp_page(&self.key, content)
                    .await
                    .map_err(|source| PageError::WriteTemp {
                        path: self.context.temp_page_path(&self.key),
                        source,
                    })?;
                debug!("page"; "wrote inline source to {}", path.display());
                self.source_content = Some(content.clone());
                self.source_file_path = Some(path);
            }
            PageSource::Route => {
                debug!("page"; "{} has no source", self.display_name());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildContext;
    use crate::page::PageOptions;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn ctx(dir: &TempDir) -> Arc<BuildContext> {
        Arc::new(BuildContext::new(dir.path().join(".temp")))
    }

    #[tokio::test]
    async fn test_file_source_is_read() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "# A").unwrap();

        let mut page = Page::new(PageOptions::file(&file, "a.md"), ctx(&dir));
        page.resolve_source().await.unwrap();

        assert_eq!(page.source_content(), Some("# A"));
        assert_eq!(page.source_file_path(), Some(file.as_path()));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("missing.md");

        let mut page = Page::new(PageOptions::file(&file, "missing.md"), ctx(&dir));
        let err = page.resolve_source().await.unwrap_err();

        assert!(matches!(err, PageError::Read { ref path, .. } if *path == file));
    }

    #[tokio::test]
    async fn test_inline_source_writes_temp_file() {
        let dir = TempDir::new().unwrap();
        let context = ctx(&dir);

        let mut page = Page::new(PageOptions::inline("/hello/", "# Hello"), context.clone());
        page.resolve_source().await.unwrap();

        let expected = context.temp_page_path(page.key());
        assert_eq!(page.source_file_path(), Some(expected.as_path()));
        assert_eq!(fs::read_to_string(&expected).unwrap(), "# Hello");
        assert_eq!(page.source_content(), Some("# Hello"));
    }

    #[tokio::test]
    async fn test_inline_temp_path_is_stable() {
        let dir = TempDir::new().unwrap();
        let context = ctx(&dir);

        let mut first = Page::new(PageOptions::inline("/hello/", "# One"), context.clone());
        let mut second = Page::new(PageOptions::inline("/hello/", "# Two"), context);
        first.resolve_source().await.unwrap();
        second.resolve_source().await.unwrap();

        assert_eq!(first.source_file_path(), second.source_file_path());
    }

    #[tokio::test]
    async fn test_unwritable_temp_dir_is_write_error() {
        let dir = TempDir::new().unwrap();
        // A regular file where the temp dir should be.
        let blocker = dir.path().join(".temp");
        fs::write(&blocker, "").unwrap();

        let mut page = Page::new(PageOptions::inline("/x/", "x"), ctx(&dir));
        let err = page.resolve_source().await.unwrap_err();

        assert!(matches!(err, PageError::WriteTemp { .. }));
    }

    #[tokio::test]
    async fn test_route_page_has_no_source() {
        let dir = TempDir::new().unwrap();

        let mut page = Page::new(PageOptions::route("/nav/"), ctx(&dir));
        page.resolve_source().await.unwrap();

        assert!(page.source_content().is_none());
        assert!(page.source_file_path().is_none());
    }
}
