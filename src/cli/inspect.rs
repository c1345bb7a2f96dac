//! Inspect command: process one page and print its record.

use std::path::Path;

use anyhow::{Context, Result, bail};

use super::session::Session;
use crate::config::SiteConfig;
use crate::page::{ContentFormat, Page};

/// Run `folio inspect <file>`.
pub async fn run_inspect(config: &SiteConfig, file: &Path) -> Result<()> {
    let page = inspect_page(config, file).await?;
    let record = page.to_json()?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Process `file` with the site's settings.
///
/// The route is derived relative to the content directory when the file
/// lives inside it.
pub async fn inspect_page(config: &SiteConfig, file: &Path) -> Result<Page> {
    if !ContentFormat::is_page_file(file) {
        bail!("`{}` is not a page source (.md, .markdown or .vue)", file.display());
    }

    let file = std::path::absolute(file).with_context(|| format!("invalid path `{}`", file.display()))?;
    let session = Session::new(config)?;
    let options = session.page_options(&file, &config.content_dir());

    let page = session.process(options).await?;
    Ok(page)
}
