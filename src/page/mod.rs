//! Page model: identity, source resolution, metadata and permalinks.

mod enhance;
mod error;
mod extract;
mod kind;
mod meta;
mod permalink;
mod process;
mod record;
mod source;

pub use enhance::{
    EnhanceError, Enhancer, FnEnhancer, FrontmatterDefaults, PageFields, enhancer, run_enhancers,
};
pub use error::PageError;
pub use extract::ContentFormat;
pub use kind::PageSource;
pub use meta::{Frontmatter, HOME_TITLE, infer_title};
pub use permalink::{PermalinkParams, format_permalink};
pub use process::ProcessContext;
pub use record::{Page, PageOptions};
