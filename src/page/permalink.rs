//! Permalink resolution.
//!
//! A permalink pattern is a path with placeholders:
//!
//! | Placeholder | Value                               |
//! |-------------|-------------------------------------|
//! | `:year`     | 4-digit year                        |
//! | `:month`    | 2-digit month                       |
//! | `:i_month`  | month without padding               |
//! | `:day`      | 2-digit day                         |
//! | `:i_day`    | day without padding                 |
//! | `:minutes`  | 2-digit minutes                     |
//! | `:seconds`  | 2-digit seconds                     |
//! | `:slug`     | page slug (URI-encoded)             |
//! | `:regular`  | regular path                        |
//!
//! `/:year/:month/:slug` on `2023-05-01-my-post.md` → `/2023/05/my-post/`.

use super::Page;
use crate::core::url::{encode_uri, ensure_ending_slash, normalize_uri};
use crate::debug;
use crate::utils::date::DateTimeUtc;

const DATE_PLACEHOLDERS: &[&str] = &[":year", ":month", ":i_month", ":day", ":i_day", ":minutes", ":seconds"];

/// Inputs of [`format_permalink`].
#[derive(Debug, Clone, Copy)]
pub struct PermalinkParams<'a> {
    pub pattern: &'a str,
    pub slug: &'a str,
    /// Page date (`YYYY-MM-DD` or RFC 3339), if known.
    pub date: Option<&'a str>,
    /// Locale prefix, starting and ending with `/`.
    pub locale_path: &'a str,
    pub regular_path: &'a str,
}

/// Expand a permalink pattern.
///
/// Each placeholder is replaced once (first occurrence). Returns `None` for
/// an empty pattern, or when the pattern needs a date the page lacks.
pub fn format_permalink(params: &PermalinkParams<'_>) -> Option<String> {
    let pattern = params.pattern.trim();
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    if pattern.is_empty() {
        return None;
    }

    let mut link = normalize_uri(pattern);

    if DATE_PLACEHOLDERS.iter().any(|p| link.contains(p)) {
        let date = params.date.and_then(DateTimeUtc::parse)?;
        let values = [
            (":year", format!("{:04}", date.year)),
            (":i_month", date.month.to_string()),
            (":month", format!("{:02}", date.month)),
            (":i_day", date.day.to_string()),
            (":day", format!("{:02}", date.day)),
            (":minutes", format!("{:02}", date.minute)),
            (":seconds", format!("{:02}", date.second)),
        ];
        for (placeholder, value) in &values {
            link = link.replacen(placeholder, value, 1);
        }
    }

    link = link.replacen(":slug", &encode_uri(params.slug), 1);
    link = link.replacen(":regular", params.regular_path.trim_start_matches('/'), 1);

    Some(ensure_ending_slash(&format!("{}{}", params.locale_path, link)))
}

impl Page {
    /// Resolve the permalink and update `path`.
    ///
    /// An explicit permalink is kept (percent-encoded). Otherwise the pattern is taken
    /// from front matter `permalink`, then from the configured pattern.
    /// Calling this again gives the same result.
    pub fn build_permalink(&mut self) {
        if self.permalink.is_none() {
            let pattern = self
                .frontmatter
                .get("permalink")
                .and_then(|value| value.as_str())
                .map(str::to_string)
                .or_else(|| self.permalink_pattern.clone());

            if let Some(pattern) = pattern {
                let slug = self.slug();
                let date = self.date();
                let regular_path = self.regular_path.as_deref().unwrap_or_default();

                self.permalink = format_permalink(&PermalinkParams {
                    pattern: &pattern,
                    slug: &slug,
                    date: date.as_deref(),
                    locale_path: &self.locale_path,
                    regular_path,
                });

                if self.permalink.is_none() {
                    debug!("page"; "{}: permalink `{}` left unresolved", self.display_name(), pattern);
                }
            }
        }

        if let Some(permalink) = &self.permalink {
            self.path = permalink.clone();
        }
    }
}
