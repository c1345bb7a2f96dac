//! Page processing errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::enhance::EnhanceError;
use crate::markdown::FrontmatterError;

/// A fatal error for one page. Sibling pages are unaffected.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page source `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write temp source `{}`", path.display())]
    WriteTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid front matter in `{page}`")]
    Frontmatter {
        page: String,
        #[source]
        source: FrontmatterError,
    },

    #[error("enhancer `{}` failed on `{page}`", .source.enhancer)]
    Enhance {
        page: String,
        #[source]
        source: EnhanceError,
    },
}

impl PageError {
    /// Name of the failing enhancer, for enhancer failures.
    pub fn enhancer(&self) -> Option<&str> {
        match self {
            Self::Enhance { source, .. } => Some(&source.enhancer),
            _ => None,
        }
    }
}
