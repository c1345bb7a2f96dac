//! Markdown to HTML rendering using pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, html};

use crate::utils::slug::SlugMode;

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
}

/// Markdown renderer shared by all pages of a build.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
    slug_mode: SlugMode,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(MarkdownOptions::all())
    }
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            options,
            slug_mode: SlugMode::default(),
        }
    }

    /// Slug mode used for header anchors.
    pub fn with_slug_mode(mut self, mode: SlugMode) -> Self {
        self.slug_mode = mode;
        self
    }

    pub fn slug_mode(&self) -> SlugMode {
        self.slug_mode
    }

    /// Event parser with this renderer's extensions.
    pub fn parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.options.to_pulldown_options())
    }

    /// Render markdown to HTML.
    pub fn render(&self, markdown: &str) -> Rendered {
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, self.parser(markdown));
        Rendered { html: out }
    }

}

/// Plain text of inline events: `**Hello** [world](/)` → `Hello world`.
pub fn inline_text<'a>(events: impl IntoIterator<Item = Event<'a>>) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) | Event::InlineMath(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph() {
        let rendered = MarkdownRenderer::default().render("Hello *world*");
        assert_eq!(rendered.html, "<p>Hello <em>world</em></p>\n");
    }

    #[test]
    fn test_render_table_extension() {
        let rendered = MarkdownRenderer::default().render("| a |\n|---|\n| b |");
        assert!(rendered.html.contains("<table>"));

        let plain = MarkdownRenderer::new(MarkdownOptions::default()).render("| a |\n|---|\n| b |");
        assert!(!plain.html.contains("<table>"));
    }

    #[test]
    fn test_inline_text() {
        let renderer = MarkdownRenderer::default();
        assert_eq!(inline_text(renderer.parser("**Hello** [world](/)")), "Hello world");
        assert_eq!(inline_text(renderer.parser("Use `cargo`")), "Use cargo");
    }
}
