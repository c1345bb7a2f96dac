//! Collaborators shared by all page tasks of one command.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use pulldown_cmark::HeadingLevel;

use crate::config::SiteConfig;
use crate::core::{BuildContext, Locales};
use crate::markdown::MarkdownRenderer;
use crate::page::{Enhancer, FrontmatterDefaults, Page, PageError, PageOptions, ProcessContext};

/// Read-only build state, cheap to clone into tasks.
#[derive(Clone)]
pub struct Session {
    context: Arc<BuildContext>,
    markdown: Arc<MarkdownRenderer>,
    locales: Arc<Locales>,
    enhancers: Arc<[Box<dyn Enhancer>]>,
    header_levels: Arc<[HeadingLevel]>,
    permalink: Option<Arc<str>>,
    pre_render: bool,
}

impl Session {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut enhancers: Vec<Box<dyn Enhancer>> = Vec::new();
        if !config.frontmatter.is_empty() {
            enhancers.push(Box::new(FrontmatterDefaults(config.frontmatter.clone())));
        }

        Ok(Self {
            context: Arc::new(BuildContext::from_config(config)),
            markdown: Arc::new(MarkdownRenderer::default().with_slug_mode(config.build.slug)),
            locales: Arc::new(config.locales.clone()),
            enhancers: enhancers.into(),
            header_levels: config.build.header_levels()?.into(),
            permalink: config.build.permalink.as_deref().map(Arc::from),
            pre_render: config.build.pre_render,
        })
    }

    /// Options for the source `file`, relative to `content_dir`.
    ///
    /// Files outside `content_dir` are keyed by their file name.
    pub fn page_options(&self, file: &Path, content_dir: &Path) -> PageOptions {
        let relative = file
            .strip_prefix(content_dir)
            .unwrap_or_else(|_| file.file_name().map_or(file, Path::new))
            .to_string_lossy()
            .replace('\\', "/");

        PageOptions {
            permalink_pattern: self.permalink.as_deref().map(str::to_string),
            header_levels: Some(self.header_levels.to_vec()),
            ..PageOptions::file(file, relative)
        }
    }

    /// Construct and process one page.
    pub async fn process(&self, options: PageOptions) -> Result<Page, PageError> {
        let mut page = Page::new(options, Arc::clone(&self.context));
        let ctx = ProcessContext {
            locales: self.locales.as_ref(),
            markdown: &self.markdown,
            enhancers: &self.enhancers,
            pre_render: self.pre_render,
        };
        page.process(&ctx).await?;
        Ok(page)
    }
}
