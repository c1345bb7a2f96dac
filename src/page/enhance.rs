//! Enhancer chain.
//!
//! Enhancers are user-supplied transformations that run after metadata
//! extraction and before permalink resolution. Each one sees a
//! [`PageFields`] view: identity is read-only, while `title`,
//! `frontmatter`, `headers` and `excerpt` may be rewritten.
//!
//! Enhancers run strictly in order. Each works on a draft that is only
//! committed to the page when it returns `Ok`, and the first failure
//! stops the chain.

use thiserror::Error;

use super::{Frontmatter, Page};
use crate::debug;
use crate::markdown::Header;

// ============================================================================
// Contract
// ============================================================================

/// A named page transformation.
pub trait Enhancer: Send + Sync {
    /// Name reported when the enhancer fails.
    fn name(&self) -> &str;

    fn enhance(&self, page: &mut PageFields<'_>) -> anyhow::Result<()>;
}

/// The first enhancer failure of a chain.
#[derive(Debug, Error)]
#[error("enhancer `{enhancer}` failed")]
pub struct EnhanceError {
    pub enhancer: String,
    #[source]
    pub source: anyhow::Error,
}

/// Mutable view of a page handed to an [`Enhancer`].
#[derive(Debug)]
pub struct PageFields<'a> {
    page: &'a Page,
    pub title: Option<String>,
    pub frontmatter: Frontmatter,
    pub headers: Option<Vec<Header>>,
    pub excerpt: Option<String>,
}

impl<'a> PageFields<'a> {
    fn draft(page: &'a Page) -> Self {
        Self {
            page,
            title: page.title.clone(),
            frontmatter: page.frontmatter.clone(),
            headers: page.headers.clone(),
            excerpt: page.excerpt.clone(),
        }
    }

    pub fn key(&self) -> &str {
        self.page.key()
    }

    pub fn path(&self) -> &str {
        self.page.path()
    }

    pub fn regular_path(&self) -> Option<&str> {
        self.page.regular_path()
    }

    pub fn relative_path(&self) -> Option<&str> {
        self.page.relative_path()
    }

    pub fn filename(&self) -> String {
        self.page.filename()
    }

    pub fn lang(&self) -> Option<&str> {
        self.page.lang()
    }

    pub fn meta(&self) -> Option<&Frontmatter> {
        self.page.meta()
    }

    /// Body without front matter, when the page has markdown content.
    pub fn content(&self) -> Option<&str> {
        self.page.stripped_content()
    }

    fn into_parts(self) -> Draft {
        Draft {
            title: self.title,
            frontmatter: self.frontmatter,
            headers: self.headers,
            excerpt: self.excerpt,
        }
    }
}

struct Draft {
    title: Option<String>,
    frontmatter: Frontmatter,
    headers: Option<Vec<Header>>,
    excerpt: Option<String>,
}

impl Draft {
    fn commit(self, page: &mut Page) {
        page.title = self.title;
        page.frontmatter = self.frontmatter;
        page.headers = self.headers;
        page.excerpt = self.excerpt;
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Run `enhancers` in order against `page`.
///
/// Stops at the first failure; changes made by the failing enhancer are
/// discarded, earlier successful ones are kept.
pub fn run_enhancers(page: &mut Page, enhancers: &[Box<dyn Enhancer>]) -> Result<(), EnhanceError> {
    for enhancer in enhancers {
        let name = enhancer.name();
        let mut fields = PageFields::draft(page);

        match enhancer.enhance(&mut fields) {
            Ok(()) => {
                let draft = fields.into_parts();
                draft.commit(page);
                debug!("enhance"; "{} applied to {}", name, page.key());
            }
            Err(source) => {
                return Err(EnhanceError {
                    enhancer: name.to_string(),
                    source,
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// Adapters
// ============================================================================

/// An [`Enhancer`] backed by a closure. See [`enhancer`].
pub struct FnEnhancer<F> {
    name: String,
    func: F,
}

impl<F> Enhancer for FnEnhancer<F>
where
    F: Fn(&mut PageFields<'_>) -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn enhance(&self, page: &mut PageFields<'_>) -> anyhow::Result<()> {
        (self.func)(page)
    }
}

/// Wrap a closure as a boxed [`Enhancer`].
///
/// ```ignore
/// let upper = enhancer("upper-title", |page| {
///     page.title = page.title.take().map(|t| t.to_uppercase());
///     Ok(())
/// });
/// ```
pub fn enhancer<F>(name: impl Into<String>, func: F) -> Box<dyn Enhancer>
where
    F: Fn(&mut PageFields<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Box::new(FnEnhancer {
        name: name.into(),
        func,
    })
}

/// Fills front matter keys a page leaves unset (config `[frontmatter]`).
#[derive(Debug, Clone, Default)]
pub struct FrontmatterDefaults(pub Frontmatter);

impl FrontmatterDefaults {
    pub const NAME: &'static str = "frontmatter-defaults";
}

impl Enhancer for FrontmatterDefaults {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn enhance(&self, page: &mut PageFields<'_>) -> anyhow::Result<()> {
        for (key, value) in &self.0 {
            match page.frontmatter.get(key) {
                Some(existing) if !existing.is_null() => {}
                _ => {
                    page.frontmatter.insert(key.clone(), value.clone());
                }
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
    use anyhow::bail;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn page() -> Page {
        let mut page = Page::new(
            PageOptions::route("/guide/"),
            Arc::new(BuildContext::new("/tmp/folio-test")),
        );
        page.title = Some("Guide".into());
        page
    }

    #[test]
    fn test_enhancers_run_in_order() {
        let enhancers = vec![
            enhancer("a", |page| {
                page.frontmatter.insert("order".into(), json!(["a"]));
                Ok(())
            }),
            enhancer("b", |page| {
                if let Some(Value::Array(order)) = page.frontmatter.get_mut("order") {
                    order.push(json!("b"));
                }
                Ok(())
            }),
        ];

        let mut page = page();
        run_enhancers(&mut page, &enhancers).unwrap();
        assert_eq!(page.frontmatter()["order"], json!(["a", "b"]));
    }

    #[test]
    fn test_first_failure_halts_chain() {
        static C_RAN: AtomicBool = AtomicBool::new(false);

        let enhancers = vec![
            enhancer("A", |page| {
                page.title = Some("from A".into());
                Ok(())
            }),
            enhancer("B", |_| bail!("boom")),
            enhancer("C", |_| {
                C_RAN.store(true, Ordering::SeqCst);
                Ok(())
            }),
        ];

        let mut page = page();
        let err = run_enhancers(&mut page, &enhancers).unwrap_err();

        assert_eq!(err.enhancer, "B");
        assert_eq!(err.source.to_string(), "boom");
        assert!(!C_RAN.load(Ordering::SeqCst));
        assert_eq!(page.title(), Some("from A"));
    }

    #[test]
    fn test_failed_enhancer_leaves_no_partial_writes() {
        let enhancers = vec![enhancer("half", |page| {
            page.title = Some("changed".into());
            page.frontmatter.insert("x".into(), json!(1));
            bail!("gave up")
        })];

        let mut page = page();
        assert!(run_enhancers(&mut page, &enhancers).is_err());
        assert_eq!(page.title(), Some("Guide"));
        assert!(page.frontmatter().is_empty());
    }

    #[test]
    fn test_identity_is_readable() {
        let enhancers = vec![enhancer("identity", |page| {
            page.title = Some(format!("{} at {}", page.key(), page.path()));
            Ok(())
        })];

        let mut page = page();
        let expected = format!("{} at /guide/", page.key());
        run_enhancers(&mut page, &enhancers).unwrap();
        assert_eq!(page.title(), Some(expected.as_str()));
    }

    #[test]
    fn test_empty_chain() {
        let mut page = page();
        run_enhancers(&mut page, &[]).unwrap();
        assert_eq!(page.title(), Some("Guide"));
    }

    #[test]
    fn test_frontmatter_defaults_fill_missing_keys() {
        let defaults = json!({ "layout": "Post", "sidebar": true })
            .as_object()
            .cloned()
            .unwrap();
        let enhancers: Vec<Box<dyn Enhancer>> = vec![Box::new(FrontmatterDefaults(defaults))];

        let mut page = page();
        page.frontmatter.insert("layout".into(), json!("Doc"));
        page.frontmatter.insert("sidebar".into(), Value::Null);
        run_enhancers(&mut page, &enhancers).unwrap();

        assert_eq!(page.frontmatter()["layout"], json!("Doc"));
        assert_eq!(page.frontmatter()["sidebar"], json!(true));
    }
}
