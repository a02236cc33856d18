//! HTML writer for the preview pane.
//!
//! Walks a markdown event stream and writes HTML. On top of plain
//! CommonMark output it knows two previewer-specific switches: turning
//! soft breaks into `<br />`, and escaping raw HTML instead of passing it
//! through.

use markdown_weaver::{Alignment, CodeBlockKind, Event, Event::*, LinkType, Tag, TagEnd};
use markdown_weaver_escape::{
    FmtWriter, StrWrite, escape_href, escape_html, escape_html_body_text,
};

use crate::convert::{ConvertOptions, RawHtml};

/// URL schemes that never survive into an `href`/`src` when raw HTML is escaped.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

enum TableState {
    Head,
    Body,
}

struct PreviewWriter<'o, I, W> {
    iter: I,
    writer: W,
    options: &'o ConvertOptions,

    /// Whether or not the last write wrote a newline.
    end_newline: bool,

    table_state: TableState,
    table_alignments: Vec<Alignment>,
    table_cell_index: usize,
}

impl<'a, 'o, I, W> PreviewWriter<'o, I, W>
where
    I: Iterator<Item = Event<'a>>,
    W: StrWrite,
{
    fn new(iter: I, writer: W, options: &'o ConvertOptions) -> Self {
        Self {
            iter,
            writer,
            options,
            end_newline: true,
            table_state: TableState::Head,
            table_alignments: vec![],
            table_cell_index: 0,
        }
    }

    #[inline]
    fn write_newline(&mut self) -> Result<(), W::Error> {
        self.end_newline = true;
        self.writer.write_str("\n")
    }

    /// Writes a buffer, and tracks whether or not a newline was written.
    #[inline]
    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)?;

        if !s.is_empty() {
            self.end_newline = s.ends_with('\n');
        }
        Ok(())
    }

    /// Opens a block-level tag on a fresh line.
    fn open_block(&mut self, tag: &str) -> Result<(), W::Error> {
        if !self.end_newline {
            self.write("\n")?;
        }
        self.write(tag)
    }

    fn write_url(&mut self, url: &str) -> Result<(), W::Error> {
        if self.options.raw_html == RawHtml::Escape && is_unsafe_url(url) {
            tracing::debug!(url, "dropping unsafe url from preview");
            return self.write("#");
        }
        escape_href(&mut self.writer, url)
    }

    fn run(mut self) -> Result<(), W::Error> {
        while let Some(event) = self.iter.next() {
            match event {
                Start(tag) => self.start_tag(tag)?,
                End(tag) => self.end_tag(tag)?,
                Text(text) => {
                    escape_html_body_text(&mut self.writer, &text)?;
                    self.end_newline = text.ends_with('\n');
                }
                Code(text) => {
                    self.write("<code>")?;
                    escape_html_body_text(&mut self.writer, &text)?;
                    self.write("</code>")?;
                }
                Html(html) | InlineHtml(html) => match self.options.raw_html {
                    RawHtml::Passthrough => self.write(&html)?,
                    RawHtml::Escape => {
                        escape_html_body_text(&mut self.writer, &html)?;
                        self.end_newline = html.ends_with('\n');
                    }
                },
                SoftBreak if self.options.breaks => self.write("<br />\n")?,
                SoftBreak => self.write_newline()?,
                HardBreak => self.write("<br />\n")?,
                Rule => self.open_block("<hr />\n")?,
                TaskListMarker(true) => {
                    self.write("<input disabled=\"\" type=\"checkbox\" checked=\"\" /> ")?;
                }
                TaskListMarker(false) => {
                    self.write("<input disabled=\"\" type=\"checkbox\" /> ")?;
                }
                // Footnotes, math and embeds are not enabled in the preview dialect.
                _ => {}
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'a>) -> Result<(), W::Error> {
        match tag {
            Tag::Paragraph => self.open_block("<p>"),
            Tag::Heading { level, .. } => {
                self.open_block("<")?;
                write!(&mut self.writer, "{}", level)?;
                self.write(">")
            }
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                self.write("<table>")
            }
            Tag::TableHead => {
                self.table_state = TableState::Head;
                self.table_cell_index = 0;
                self.write("<thead><tr>")
            }
            Tag::TableRow => {
                self.table_cell_index = 0;
                self.write("<tr>")
            }
            Tag::TableCell => {
                match self.table_state {
                    TableState::Head => self.write("<th")?,
                    TableState::Body => self.write("<td")?,
                }
                match self.table_alignments.get(self.table_cell_index) {
                    Some(&Alignment::Left) => self.write(" style=\"text-align: left\">"),
                    Some(&Alignment::Center) => self.write(" style=\"text-align: center\">"),
                    Some(&Alignment::Right) => self.write(" style=\"text-align: right\">"),
                    _ => self.write(">"),
                }
            }
            Tag::BlockQuote(_) => self.open_block("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                if !self.end_newline {
                    self.write_newline()?;
                }
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => info.split(' ').next().unwrap_or_default(),
                    CodeBlockKind::Indented => "",
                };
                if lang.is_empty() {
                    self.write("<pre><code>")
                } else {
                    self.write("<pre><code class=\"language-")?;
                    escape_html(&mut self.writer, lang)?;
                    self.write("\">")
                }
            }
            Tag::List(Some(1)) => self.open_block("<ol>\n"),
            Tag::List(Some(start)) => {
                self.open_block("<ol start=\"")?;
                write!(&mut self.writer, "{}", start)?;
                self.write("\">\n")
            }
            Tag::List(None) => self.open_block("<ul>\n"),
            Tag::Item => self.open_block("<li>"),
            Tag::Emphasis => self.write("<em>"),
            Tag::Strong => self.write("<strong>"),
            Tag::Strikethrough => self.write("<del>"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                self.write("<a href=\"")?;
                if link_type == LinkType::Email {
                    self.write("mailto:")?;
                }
                self.write_url(&dest_url)?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut self.writer, &title)?;
                }
                self.write("\">")
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.write("<img src=\"")?;
                self.write_url(&dest_url)?;
                self.write("\" alt=\"")?;
                self.alt_text()?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut self.writer, &title)?;
                }
                self.write("\" />")
            }
            _ => Ok(()),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), W::Error> {
        match tag {
            TagEnd::Paragraph => self.write("</p>\n"),
            TagEnd::Heading(level) => {
                self.write("</")?;
                write!(&mut self.writer, "{}", level)?;
                self.write(">\n")
            }
            TagEnd::Table => self.write("</tbody></table>\n"),
            TagEnd::TableHead => {
                self.table_state = TableState::Body;
                self.write("</tr></thead><tbody>\n")
            }
            TagEnd::TableRow => self.write("</tr>\n"),
            TagEnd::TableCell => {
                self.table_cell_index += 1;
                match self.table_state {
                    TableState::Head => self.write("</th>"),
                    TableState::Body => self.write("</td>"),
                }
            }
            TagEnd::BlockQuote(_) => self.write("</blockquote>\n"),
            TagEnd::CodeBlock => self.write("</code></pre>\n"),
            TagEnd::List(true) => self.write("</ol>\n"),
            TagEnd::List(false) => self.write("</ul>\n"),
            TagEnd::Item => self.write("</li>\n"),
            TagEnd::Emphasis => self.write("</em>"),
            TagEnd::Strong => self.write("</strong>"),
            TagEnd::Strikethrough => self.write("</del>"),
            TagEnd::Link => self.write("</a>"),
            _ => Ok(()),
        }
    }

    /// Writes the text content of an image as an attribute value, consuming
    /// events up to and including the image's end tag.
    fn alt_text(&mut self) -> Result<(), W::Error> {
        let mut nest = 0;
        while let Some(event) = self.iter.next() {
            match event {
                Start(_) => nest += 1,
                End(_) => {
                    if nest == 0 {
                        break;
                    }
                    nest -= 1;
                }
                InlineHtml(text) | Code(text) | Text(text) => {
                    escape_html(&mut self.writer, &text)?;
                    self.end_newline = text.ends_with('\n');
                }
                SoftBreak | HardBreak | Rule => self.write(" ")?,
                _ => {}
            }
        }
        Ok(())
    }
}

fn is_unsafe_url(url: &str) -> bool {
    let url = url.trim_start().as_bytes();
    UNSAFE_SCHEMES.iter().any(|scheme| {
        url.len() >= scheme.len() && url[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
    })
}

/// Write the HTML for `iter` into any `fmt::Write` sink.
pub fn write_preview_html<'a, I, W>(
    writer: W,
    iter: I,
    options: &ConvertOptions,
) -> core::fmt::Result
where
    I: Iterator<Item = Event<'a>>,
    W: core::fmt::Write,
{
    PreviewWriter::new(iter, FmtWriter(writer), options).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_schemes_are_case_insensitive() {
        assert!(is_unsafe_url("javascript:alert(1)"));
        assert!(is_unsafe_url("  JavaScript:alert(1)"));
        assert!(is_unsafe_url("DATA:text/html,hi"));
        assert!(!is_unsafe_url("https://example.com"));
        assert!(!is_unsafe_url("url"));
        assert!(!is_unsafe_url("java"));
    }
}
