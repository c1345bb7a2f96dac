//! URL slugification for page slugs and header anchors.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whitespace and URL-hostile punctuation, collapsed into one separator.
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s~`!@#$%^&*()\-_+=\[\]{}|\\;:"'“”‘’<>,.?/]+"#).unwrap()
});

/// Control characters and combining diacritical marks.
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1f\x7f\u{0300}-\u{036f}]").unwrap());

/// Slug generation mode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Transliterate Unicode to ASCII before slugifying.
    Full,
    /// Keep non-ASCII letters as-is (they are percent-encoded in URLs).
    #[default]
    Safe,
}

/// Slugify with the default [`SlugMode::Safe`].
#[inline]
pub fn slugify(text: &str) -> String {
    slugify_with(text, SlugMode::Safe)
}

/// Turn arbitrary text into a lowercase, dash-separated slug.
///
/// A slug never starts or ends with `-`; one starting with a digit is
/// prefixed with `_` so it stays a valid HTML id.
///
/// # Examples
/// ```
/// use folio::utils::slug::{SlugMode, slugify_with};
/// assert_eq!(slugify_with("Hello, World!", SlugMode::Safe), "hello-world");
/// assert_eq!(slugify_with("Café au lait", SlugMode::Full), "cafe-au-lait");
/// ```
pub fn slugify_with(text: &str, mode: SlugMode) -> String {
    let text = match mode {
        SlugMode::Full => deunicode::deunicode(text),
        SlugMode::Safe => text.to_string(),
    };

    let stripped = STRIP.replace_all(&text, "");
    let dashed = SPECIAL.replace_all(&stripped, "-");
    let trimmed = dashed.trim_matches('-');

    let mut slug = String::with_capacity(trimmed.len() + 1);
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        slug.push('_');
    }
    slug.push_str(&trimmed.to_lowercase());
    slug
}
