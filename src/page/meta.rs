//! Page front matter and title inference.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};
use serde_json::Value;

use crate::markdown::{MarkdownRenderer, inline_text};

/// Front matter: arbitrary fields in document order.
pub type Frontmatter = serde_json::Map<String, Value>;

/// Title used for pages marked `home: true` without an explicit title.
pub const HOME_TITLE: &str = "Home";

/// Infer a page title.
///
/// In order of precedence:
/// 1. front matter `title` (string, number or bool)
/// 2. `"Home"` when front matter has `home: true`
/// 3. a level-1 heading (ATX or setext) opening the body, with inline
///    markup stripped
pub fn infer_title(frontmatter: &Frontmatter, body: &str, renderer: &MarkdownRenderer) -> Option<String> {
    if let Some(title) = frontmatter.get("title").and_then(scalar_to_string) {
        return Some(title);
    }

    if frontmatter.get("home").and_then(Value::as_bool) == Some(true) {
        return Some(HOME_TITLE.to_string());
    }

    let mut events = renderer.parser(body);
    let Some(Event::Start(Tag::Heading {
        level: HeadingLevel::H1,
        ..
    })) = events.next()
    else {
        return None;
    };
    let title = inline_text(events.take_while(|event| !matches!(event, Event::End(TagEnd::Heading(_)))));
    (!title.is_empty()).then_some(title)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    let title = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!title.is_empty()).then_some(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fm(value: Value) -> Frontmatter {
        value.as_object().cloned().unwrap()
    }

    fn infer(frontmatter: &Frontmatter, body: &str) -> Option<String> {
        infer_title(frontmatter, body, &MarkdownRenderer::default())
    }

    #[test]
    fn test_frontmatter_title_wins_over_heading() {
        let title = infer(&fm(json!({ "title": "T" })), "# Other");
        assert_eq!(title.as_deref(), Some("T"));
    }

    #[test]
    fn test_heading_title() {
        let title = infer(&Frontmatter::new(), "# Hello\n\ntext");
        assert_eq!(title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_setext_heading_title() {
        let title = infer(&Frontmatter::new(), "Hello\n=====\n\ntext");
        assert_eq!(title.as_deref(), Some("Hello"));

        assert_eq!(infer(&Frontmatter::new(), "Hello\n-----\n"), None);
    }

    #[test]
    fn test_heading_markup_is_stripped() {
        let title = infer(&Frontmatter::new(), "\n\n# Hello *big* `world` {#top}\n");
        assert_eq!(title.as_deref(), Some("Hello big world"));
    }

    #[test]
    fn test_only_leading_h1_counts() {
        assert_eq!(infer(&Frontmatter::new(), "intro\n\n# Later"), None);
        assert_eq!(infer(&Frontmatter::new(), "## Section"), None);
        assert_eq!(infer(&Frontmatter::new(), ""), None);
    }

    #[test]
    fn test_home_title() {
        let title = infer(&fm(json!({ "home": true })), "# Welcome");
        assert_eq!(title.as_deref(), Some(HOME_TITLE));
    }

    #[test]
    fn test_empty_frontmatter_title_falls_through() {
        let title = infer(&fm(json!({ "title": "  " })), "# Hello");
        assert_eq!(title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_numeric_title() {
        let title = infer(&fm(json!({ "title": 2024 })), "");
        assert_eq!(title.as_deref(), Some("2024"));
    }
}
