//! Markdown to HTML conversion for the preview pane.

use markdown_weaver::{Options, Parser};
use serde::Deserialize;

use crate::error::ConvertError;
use crate::html::write_preview_html;

/// Fragment shown in the preview when conversion fails.
pub const ERROR_PLACEHOLDER: &str = "<p>Error parsing markdown</p>";

/// What to do with raw HTML found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawHtml {
    /// Write raw HTML as visible, escaped text and neutralize script-capable URLs.
    #[default]
    Escape,
    /// Inject raw HTML into the preview unchanged.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Render single newlines as `<br />`.
    pub breaks: bool,
    pub raw_html: RawHtml,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            breaks: true,
            raw_html: RawHtml::default(),
        }
    }
}

/// Something that turns markdown source into HTML.
pub trait Converter {
    fn convert(&self, source: &str) -> Result<String, ConvertError>;
}

/// Markdown dialect used by the preview: tables, strikethrough and task lists.
///
/// Blockquote alerts (`> [!NOTE]`) stay plain blockquotes.
pub fn preview_md_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// The production converter, backed by markdown-weaver.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: ConvertOptions,
}

impl MarkdownConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }
}

impl Converter for MarkdownConverter {
    fn convert(&self, source: &str) -> Result<String, ConvertError> {
        let parser = Parser::new_ext(source, preview_md_options());
        let mut html = String::with_capacity(source.len() + source.len() / 2);
        write_preview_html(&mut html, parser, &self.options)?;
        Ok(html)
    }
}

/// Convert `source`, falling back to [`ERROR_PLACEHOLDER`] on failure.
///
/// The error itself only goes to the log.
pub fn render_or_placeholder<C: Converter + ?Sized>(converter: &C, source: &str) -> String {
    match converter.convert(source) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, len = source.len(), "Error parsing markdown");
            ERROR_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(source: &str) -> String {
        MarkdownConverter::default().convert(source).unwrap()
    }

    /// Converter whose sink rejects every write, like a writer hitting a
    /// closed stream.
    struct BrokenSink;

    impl Converter for BrokenSink {
        fn convert(&self, source: &str) -> Result<String, ConvertError> {
            struct Reject;
            impl std::fmt::Write for Reject {
                fn write_str(&mut self, _: &str) -> std::fmt::Result {
                    Err(std::fmt::Error)
                }
            }
            let parser = Parser::new_ext(source, preview_md_options());
            write_preview_html(Reject, parser, &ConvertOptions::default())?;
            Ok(String::new())
        }
    }

    #[test]
    fn empty_input_renders_nothing() {
        let html = render_or_placeholder(&MarkdownConverter::default(), "");
        assert_eq!(html, "");
        assert_ne!(html, ERROR_PLACEHOLDER);
    }

    #[test]
    fn strong_emphasis() {
        assert_eq!(
            convert("**hello** world"),
            "<p><strong>hello</strong> world</p>\n"
        );
    }

    #[test]
    fn single_newline_becomes_break() {
        assert_eq!(convert("a\nb"), "<p>a<br />\nb</p>\n");
    }

    #[test]
    fn single_newline_kept_without_breaks() {
        let converter = MarkdownConverter::new(ConvertOptions {
            breaks: false,
            ..Default::default()
        });
        assert_eq!(converter.convert("a\nb").unwrap(), "<p>a\nb</p>\n");
    }

    #[test]
    fn list_and_emphasis() {
        let html = convert("- one\n- *two*");
        insta::assert_snapshot!(html.trim_end(), @r"
        <ul>
        <li>one</li>
        <li><em>two</em></li>
        </ul>
        ");
    }

    #[test]
    fn empty_link_placeholder() {
        assert_eq!(convert("[](url)"), "<p><a href=\"url\"></a></p>\n");
    }

    #[test]
    fn raw_html_is_escaped_by_default() {
        assert_eq!(
            convert("a <b>x</b>"),
            "<p>a &lt;b&gt;x&lt;/b&gt;</p>\n"
        );
    }

    #[test]
    fn raw_html_passthrough() {
        let converter = MarkdownConverter::new(ConvertOptions {
            raw_html: RawHtml::Passthrough,
            ..Default::default()
        });
        assert_eq!(
            converter.convert("a <b>x</b>").unwrap(),
            "<p>a <b>x</b></p>\n"
        );
    }

    #[test]
    fn script_links_are_neutralized() {
        assert_eq!(
            convert("[x](javascript:alert(1))"),
            "<p><a href=\"#\">x</a></p>\n"
        );
    }

    #[test]
    fn writer_failure_becomes_placeholder() {
        assert!(matches!(
            BrokenSink.convert("# title"),
            Err(ConvertError::Render(_))
        ));
        assert_eq!(render_or_placeholder(&BrokenSink, "# title"), ERROR_PLACEHOLDER);
        assert_eq!(ERROR_PLACEHOLDER, "<p>Error parsing markdown</p>");
    }

    #[test]
    fn rendering_is_repeatable() {
        let source = "# Notes\n\nSome *text* and a [link](https://example.com).\n\n| a | b |\n|---|---|\n| 1 | 2 |";
        let converter = MarkdownConverter::default();
        let first = render_or_placeholder(&converter, source);
        assert_eq!(first, render_or_placeholder(&converter, source));
        insta::assert_snapshot!(first.trim_end(), @r#"
        <h1>Notes</h1>
        <p>Some <em>text</em> and a <a href="https://example.com">link</a>.</p>
        <table><thead><tr><th>a</th><th>b</th></tr></thead><tbody>
        <tr><td>1</td><td>2</td></tr>
        </tbody></table>
        "#);
    }

    #[test]
    fn table_alignment() {
        insta::assert_snapshot!(convert("| a | b | c |\n|:--|:-:|--:|\n| 1 | 2 | 3 |").trim_end(), @r#"
        <table><thead><tr><th style="text-align: left">a</th><th style="text-align: center">b</th><th style="text-align: right">c</th></tr></thead><tbody>
        <tr><td style="text-align: left">1</td><td style="text-align: center">2</td><td style="text-align: right">3</td></tr>
        </tbody></table>
        "#);
    }

    #[test]
    fn strikethrough() {
        assert_eq!(convert("~~x~~"), "<p><del>x</del></p>\n");
    }

    #[test]
    fn task_list() {
        insta::assert_snapshot!(convert("- [ ] todo\n- [x] done").trim_end(), @r#"
        <ul>
        <li><input disabled="" type="checkbox" /> todo</li>
        <li><input disabled="" type="checkbox" checked="" /> done</li>
        </ul>
        "#);
    }

    #[test]
    fn alert_syntax_stays_a_plain_blockquote() {
        insta::assert_snapshot!(convert("> [!NOTE]\n> hi").trim_end(), @r"
        <blockquote>
        <p>[!NOTE]<br />
        hi</p>
        </blockquote>
        ");
    }

    #[test]
    fn fenced_code_language_class() {
        insta::assert_snapshot!(convert("```rust\nlet a = 1 < 2;\n```").trim_end(), @r#"
        <pre><code class="language-rust">let a = 1 &lt; 2;
        </code></pre>
        "#);
    }

    #[test]
    fn ordered_list_start() {
        insta::assert_snapshot!(convert("3. a\n4. b").trim_end(), @r#"
        <ol start="3">
        <li>a</li>
        <li>b</li>
        </ol>
        "#);
        assert!(convert("1. a").starts_with("<ol>\n"));
    }

    #[test]
    fn image_alt_text() {
        assert_eq!(
            convert("![a *crab*](crab.png \"Ferris\")"),
            "<p><img src=\"crab.png\" alt=\"a crab\" title=\"Ferris\" /></p>\n"
        );
    }

    #[test]
    fn unsafe_image_sources_are_neutralized() {
        assert_eq!(
            convert("![a](data:text/html,x)"),
            "<p><img src=\"#\" alt=\"a\" /></p>\n"
        );
        assert_eq!(
            convert("![b](VBScript:msgbox)"),
            "<p><img src=\"#\" alt=\"b\" /></p>\n"
        );
    }

    #[test]
    fn email_autolink() {
        assert_eq!(
            convert("<me@example.com>"),
            "<p><a href=\"mailto:me@example.com\">me@example.com</a></p>\n"
        );
    }

    #[test]
    fn raw_html_block_is_escaped() {
        insta::assert_snapshot!(convert("<div>\nhi\n</div>\n").trim_end(), @r"
        &lt;div&gt;
        hi
        &lt;/div&gt;
        ");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ConvertOptions = serde_json::from_str(r#"{"raw_html":"passthrough"}"#).unwrap();
        assert!(options.breaks);
        assert_eq!(options.raw_html, RawHtml::Passthrough);
    }
}
