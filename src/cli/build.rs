//! Build command: process every page of the content directory.
//!
//! Pipeline:
//! - **Collect** - walk the content dir for `.md` / `.vue` sources
//! - **Process** - one tokio task per page
//! - **Check** - report pages that resolve to the same path
//! - **Write** - page records as a JSON array, sorted by path

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use jwalk::WalkDir;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::task::JoinSet;

use super::session::Session;
use crate::config::SiteConfig;
use crate::page::{ContentFormat, Page};
use crate::{debug, log};

/// Files never treated as pages.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Outcome of processing all pages.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Processed pages, sorted by path.
    pub pages: Vec<Page>,
    /// Sources that failed, with the rendered error chain.
    pub failures: Vec<(PathBuf, String)>,
}

/// Run `folio build`.
pub async fn run_build(config: &SiteConfig, strict: bool) -> Result<()> {
    let report = build_pages(config).await?;

    if !report.failures.is_empty() {
        log!("build"; "{} failed", pages_label(report.failures.len()));
        if strict {
            bail!("build failed with {}", pages_label(report.failures.len()));
        }
    }

    write_records(&report.pages, config.output_path().as_deref()).await?;
    log!("build"; "processed {}", pages_label(report.pages.len()));
    Ok(())
}

/// Collect and process every page under the content directory.
///
/// A failing page is logged and left out; its siblings are unaffected.
pub async fn build_pages(config: &SiteConfig) -> Result<BuildReport> {
    let content_dir = config.content_dir();
    if !content_dir.is_dir() {
        bail!("content directory `{}` does not exist", content_dir.display());
    }

    let session = Session::new(config)?;
    let files = collect_page_files(&content_dir);
    debug!("build"; "found {} in {}", pages_label(files.len()), content_dir.display());

    let mut tasks = JoinSet::new();
    for file in files {
        let options = session.page_options(&file, &content_dir);
        let session = session.clone();
        tasks.spawn(async move {
            let result = session.process(options).await;
            (file, result)
        });
    }

    let mut report = BuildReport::default();
    while let Some(joined) = tasks.join_next().await {
        let (file, result) = joined.context("page task panicked")?;
        match result {
            Ok(page) => report.pages.push(page),
            Err(err) => {
                let message = format!("{:#}", anyhow!(err));
                log!("error"; "{}", message);
                report.failures.push((file, message));
            }
        }
    }

    report.pages.sort_by(|a, b| a.path().cmp(b.path()).then_with(|| a.key().cmp(b.key())));
    report.failures.sort();
    warn_path_conflicts(&report.pages);

    Ok(report)
}

/// Page sources under `dir`, sorted.
pub fn collect_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .filter(|path| ContentFormat::is_page_file(path))
        .collect();
    files.sort();
    files
}

/// Log every path claimed by more than one page.
fn warn_path_conflicts(pages: &[Page]) -> usize {
    let mut by_path: FxHashMap<&str, Vec<String>> = FxHashMap::default();
    for page in pages {
        by_path.entry(page.path()).or_default().push(page.display_name());
    }

    let mut conflicts: Vec<_> = by_path.into_iter().filter(|(_, owners)| owners.len() > 1).collect();
    conflicts.sort();
    for (path, owners) in &conflicts {
        log!("warning"; "`{}` is claimed by {}", path, owners.join(", "));
    }
    conflicts.len()
}

/// Serialize page records as a pretty JSON array.
pub fn records_json(pages: &[Page]) -> Result<String> {
    let records = pages
        .iter()
        .map(Page::to_json)
        .collect::<serde_json::Result<Vec<Value>>>()?;
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Write records to `output`, or stdout when `None`.
pub async fn write_records(pages: &[Page], output: Option<&Path>) -> Result<()> {
    let json = records_json(pages)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create `{}`", parent.display()))?;
            }
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            debug!("build"; "wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn pages_label(count: usize) -> String {
    format!("{} page{}", count, if count == 1 { "" } else { "s" })
}
