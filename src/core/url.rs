//! URL path helpers for page routes.
//!
//! - Regular paths are stored percent-encoded (`encode_uri`)
//! - Source-relative files map to routes with `file_to_route`

use std::path::Path;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped by `encode_uri`: everything outside the URI
/// unreserved and reserved sets (non-ASCII is always escaped).
const URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode a full URI path, keeping `/`, `?`, `#`, `:` and friends.
///
/// # Examples
/// ```
/// use folio::core::url::encode_uri;
/// assert_eq!(encode_uri("/posts/hello world/"), "/posts/hello%20world/");
/// assert_eq!(encode_uri("/中文/"), "/%E4%B8%AD%E6%96%87/");
/// assert_eq!(encode_uri("/a?b=c#d"), "/a?b=c#d");
/// ```
pub fn encode_uri(path: &str) -> String {
    utf8_percent_encode(path, URI).to_string()
}

/// Decode percent-encoding, keeping the input when it is not valid UTF-8.
pub fn decode_uri(path: &str) -> String {
    percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Percent-encode a path that may already be partly encoded.
///
/// ```
/// use folio::core::url::normalize_uri;
/// assert_eq!(normalize_uri("/hello world/"), "/hello%20world/");
/// assert_eq!(normalize_uri("/hello%20world/"), "/hello%20world/");
/// ```
pub fn normalize_uri(path: &str) -> String {
    encode_uri(&decode_uri(path))
}

/// Map a source-relative file to its route.
///
/// | Source              | Route                |
/// |---------------------|----------------------|
/// | `README.md`         | `/`                  |
/// | `guide/index.md`    | `/guide/`            |
/// | `guide/intro.md`    | `/guide/intro.html`  |
/// | `layouts/Home.vue`  | `/layouts/Home.html` |
pub fn file_to_route(relative: &str) -> String {
    let normalized = relative.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');

    let (dir, file) = match normalized.rfind('/') {
        Some(idx) => (&normalized[..=idx], &normalized[idx + 1..]),
        None => ("", normalized),
    };

    if is_index_file(file) {
        return format!("/{dir}");
    }

    let stem = file
        .strip_suffix(".md")
        .or_else(|| file.strip_suffix(".vue"))
        .unwrap_or(file);
    format!("/{dir}{stem}.html")
}

/// `index.md` / `readme.md`, case-insensitive.
fn is_index_file(file: &str) -> bool {
    let lower = file.to_ascii_lowercase();
    lower == "index.md" || lower == "readme.md"
}

/// Append `/` unless the link already ends with `/` or `.html`.
pub fn ensure_ending_slash(link: &str) -> String {
    if link.ends_with('/') || link.ends_with(".html") {
        link.to_string()
    } else {
        format!("{link}/")
    }
}

/// File stem of a (possibly encoded) URL path: `/a/b%20c.html` → `b c`.
///
/// Directory routes yield their last segment: `/guide/` → `guide`.
pub fn route_stem(path: &str) -> String {
    let decoded = decode_uri(path);
    let trimmed = decoded.trim_end_matches('/');
    Path::new(trimmed)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_keeps_reserved() {
        assert_eq!(encode_uri("/a/b.html"), "/a/b.html");
        assert_eq!(encode_uri("/a;b,c:d@e&f=g+h$i"), "/a;b,c:d@e&f=g+h$i");
        assert_eq!(encode_uri("/a-b_c.d!e~f*g'h(i)"), "/a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn test_encode_uri_escapes() {
        assert_eq!(encode_uri("/a b"), "/a%20b");
        assert_eq!(encode_uri("/100%"), "/100%25");
        assert_eq!(encode_uri("/{x}"), "/%7Bx%7D");
        assert_eq!(encode_uri("/é"), "/%C3%A9");
    }

    #[test]
    fn test_decode_uri() {
        assert_eq!(decode_uri("/posts/%E4%B8%AD%E6%96%87/"), "/posts/中文/");
        assert_eq!(decode_uri("/posts/%FF/"), "/posts/%FF/");
    }

    #[test]
    fn test_file_to_route_index() {
        assert_eq!(file_to_route("README.md"), "/");
        assert_eq!(file_to_route("index.md"), "/");
        assert_eq!(file_to_route("guide/README.md"), "/guide/");
        assert_eq!(file_to_route("guide/Index.md"), "/guide/");
    }

    #[test]
    fn test_file_to_route_regular() {
        assert_eq!(file_to_route("guide/intro.md"), "/guide/intro.html");
        assert_eq!(file_to_route("layouts/Home.vue"), "/layouts/Home.html");
        assert_eq!(file_to_route("guide\\intro.md"), "/guide/intro.html");
        assert_eq!(file_to_route("/about.md"), "/about.html");
    }

    #[test]
    fn test_ensure_ending_slash() {
        assert_eq!(ensure_ending_slash("/a"), "/a/");
        assert_eq!(ensure_ending_slash("/a/"), "/a/");
        assert_eq!(ensure_ending_slash("/a.html"), "/a.html");
    }

    #[test]
    fn test_route_stem() {
        assert_eq!(route_stem("/guide/intro.html"), "intro");
        assert_eq!(route_stem("/guide/"), "guide");
        assert_eq!(route_stem("/posts/hello%20world.html"), "hello world");
        assert_eq!(route_stem("/"), "");
    }
}
