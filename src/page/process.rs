//! The per-page pipeline.

use super::enhance::{Enhancer, run_enhancers};
use super::{Page, PageError};
use crate::core::LocaleResolver;
use crate::debug;
use crate::markdown::MarkdownRenderer;

/// Collaborators shared by every page of a build.
#[derive(Clone, Copy)]
pub struct ProcessContext<'a> {
    pub locales: &'a dyn LocaleResolver,
    pub markdown: &'a MarkdownRenderer,
    pub enhancers: &'a [Box<dyn Enhancer>],
    /// Keep the rendered body HTML on the page.
    pub pre_render: bool,
}

impl Page {
    /// Run the page through source resolution, metadata extraction, locale
    /// attachment, enhancers and permalink resolution, in that order.
    ///
    /// The first failing phase aborts the page.
    pub async fn process(&mut self, ctx: &ProcessContext<'_>) -> Result<(), PageError> {
        self.resolve_source().await?;
        self.extract_metadata(ctx.markdown, ctx.pre_render)?;

        let computed = ctx.locales.resolve(self);
        self.locale_path = computed.locale_path;
        self.lang = computed.lang;

        run_enhancers(self, ctx.enhancers).map_err(|source| PageError::Enhance {
            page: self.display_name(),
            source,
        })?;

        self.build_permalink();
        debug!("page"; "{} -> {}", self.display_name(), self.path);
        Ok(())
    }
}
