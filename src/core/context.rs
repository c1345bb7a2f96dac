//! Build context shared by all pages of one build.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::utils::slug::SlugMode;

/// Directory under the temp root holding synthesized page sources.
pub const TEMP_PAGES_DIR: &str = "temp-pages";

/// Read-only state every page of a build shares.
///
/// Pages hold it behind an `Arc`; nothing in here is mutated after
/// construction, so pages can be processed on any number of tasks.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Root of temp files (e.g. `<root>/.temp`).
    pub temp_dir: PathBuf,
    /// Slug mode for page slugs.
    pub slug_mode: SlugMode,
}

impl BuildContext {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            slug_mode: SlugMode::default(),
        }
    }

    pub fn with_slug_mode(mut self, mode: SlugMode) -> Self {
        self.slug_mode = mode;
        self
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.temp_dir()).with_slug_mode(config.build.slug)
    }

    /// Deterministic temp location of an inline page's source.
    pub fn temp_page_path(&self, key: &str) -> PathBuf {
        self.temp_dir.join(temp_page_relative(key))
    }

    /// Synthesize the backing file of an inline page at [`Self::temp_page_path`].
    pub async fn write_temp_page(&self, key: &str, content: &str) -> io::Result<PathBuf> {
        self.write_temp(temp_page_relative(key), content).await
    }

    /// Write `content` to `relative` under the temp dir and return the path.
    ///
    /// The file is left untouched when it already holds the same content,
    /// so repeated builds do not bump its mtime.
    pub async fn write_temp(&self, relative: impl AsRef<Path>, content: &str) -> io::Result<PathBuf> {
        let path = self.temp_dir.join(relative);
        write_if_changed(&path, content).await?;
        Ok(path)
    }
}

fn temp_page_relative(key: &str) -> PathBuf {
    Path::new(TEMP_PAGES_DIR).join(format!("{key}.md"))
}

async fn write_if_changed(path: &Path, content: &str) -> io::Result<()> {
    if let Ok(existing) = tokio::fs::read_to_string(path).await
        && existing == content
    {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_temp_creates_parents() {
        let dir = TempDir::new().unwrap();
        let ctx = BuildContext::new(dir.path());

        let path = ctx.write_temp("temp-pages/v-1.md", "# Hi").await.unwrap();

        assert_eq!(path, dir.path().join("temp-pages/v-1.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hi");
    }

    #[tokio::test]
    async fn test_write_temp_overwrites_changed_content() {
        let dir = TempDir::new().unwrap();
        let ctx = BuildContext::new(dir.path());

        ctx.write_temp("a.md", "one").await.unwrap();
        let path = ctx.write_temp("a.md", "two").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "two");
    }

    #[tokio::test]
    async fn test_write_temp_page_is_keyed() {
        let dir = TempDir::new().unwrap();
        let ctx = BuildContext::new(dir.path());

        let first = ctx.write_temp_page("v-abc", "x").await.unwrap();
        let second = ctx.write_temp_page("v-abc", "x").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, ctx.temp_page_path("v-abc"));
    }

    #[test]
    fn test_temp_page_path_is_keyed() {
        let ctx = BuildContext::new("/tmp/site/.temp");
        assert_eq!(
            ctx.temp_page_path("v-abc"),
            PathBuf::from("/tmp/site/.temp/temp-pages/v-abc.md")
        );
    }
}
