//! Page source kind.

use std::path::{Path, PathBuf};

/// Where a page's content comes from.
///
/// Chosen once at construction from the supplied options; a backing file
/// takes precedence over inline content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSource {
    /// Backed by an existing source file.
    File { path: PathBuf },
    /// In-memory content; a temp file is synthesized when the page is processed.
    Inline { content: String },
    /// Neither file nor content: a purely navigational entry.
    #[default]
    Route,
}

impl PageSource {
    /// Determine the source kind from optional constructor inputs.
    pub fn from_options(file_path: Option<PathBuf>, content: Option<String>) -> Self {
        match (file_path, content) {
            (Some(path), _) => Self::File { path },
            (None, Some(content)) => Self::Inline { content },
            (None, None) => Self::Route,
        }
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }

    #[inline]
    pub fn is_route(&self) -> bool {
        matches!(self, Self::Route)
    }

    /// Backing file given at construction (file pages only).
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_wins_over_content() {
        let source = PageSource::from_options(Some("a.md".into()), Some("# A".into()));
        assert!(source.is_file());
        assert_eq!(source.file_path(), Some(Path::new("a.md")));
    }

    #[test]
    fn test_inline() {
        let source = PageSource::from_options(None, Some("# A".into()));
        assert!(source.is_inline());
        assert_eq!(source.file_path(), None);
    }

    #[test]
    fn test_route() {
        let source = PageSource::from_options(None, None);
        assert!(source.is_route());
        assert_eq!(source, PageSource::default());
    }
}
