//! Locale resolution for pages.
//!
//! Locales are configured by path prefix:
//!
//! ```toml
//! [locales."/"]
//! lang = "en-US"
//!
//! [locales."/zh/"]
//! lang = "zh-CN"
//! ```
//!
//! A page belongs to the longest prefix its regular path starts with.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// Locale path used when no configured prefix matches.
pub const ROOT_LOCALE: &str = "/";

/// Per-locale settings (`[locales."<prefix>"]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Language tag, e.g. `zh-CN`.
    pub lang: Option<String>,
}

/// Locale-aware view of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computed {
    /// Matching locale prefix, always starting and ending with `/`.
    pub locale_path: String,
    pub lang: Option<String>,
}

impl Default for Computed {
    fn default() -> Self {
        Self {
            locale_path: ROOT_LOCALE.to_string(),
            lang: None,
        }
    }
}

/// Resolves the locale-aware view of a page.
pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, page: &Page) -> Computed;
}

/// Configured locales keyed by path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locales(BTreeMap<String, LocaleConfig>);

impl Locales {
    pub fn new(locales: BTreeMap<String, LocaleConfig>) -> Self {
        Self(locales)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Resolve by regular path (longest matching prefix).
    pub fn resolve_path(&self, regular_path: &str) -> Computed {
        let matched = self
            .0
            .iter()
            .filter(|(prefix, _)| regular_path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());

        match matched {
            Some((prefix, locale)) => Computed {
                locale_path: prefix.clone(),
                lang: locale.lang.clone(),
            },
            None => Computed::default(),
        }
    }
}

impl LocaleResolver for Locales {
    fn resolve(&self, page: &Page) -> Computed {
        match page.regular_path() {
            Some(regular_path) => self.resolve_path(regular_path),
            None => self.resolve_path(ROOT_LOCALE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> Locales {
        let mut map = BTreeMap::new();
        map.insert(
            "/".to_string(),
            LocaleConfig {
                lang: Some("en-US".into()),
            },
        );
        map.insert(
            "/zh/".to_string(),
            LocaleConfig {
                lang: Some("zh-CN".into()),
            },
        );
        Locales::new(map)
    }

    #[test]
    fn test_longest_prefix_wins() {
        let computed = locales().resolve_path("/zh/guide/intro.html");
        assert_eq!(computed.locale_path, "/zh/");
        assert_eq!(computed.lang.as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_root_locale() {
        let computed = locales().resolve_path("/guide/intro.html");
        assert_eq!(computed.locale_path, "/");
        assert_eq!(computed.lang.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_no_locales_defaults_to_root() {
        let computed = Locales::default().resolve_path("/zh/guide/");
        assert_eq!(computed, Computed::default());
    }
}
