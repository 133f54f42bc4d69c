//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::{AlertKind, Element, RenderBackend, class_attr};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};
use crate::util::{fence_language, heading_level_to_num};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if `extract_title` was enabled).
    pub title: Option<String>,
    /// Table of contents entries for headings below H1.
    pub toc: Vec<TocEntry>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait to delegate format-specific rendering
/// while handling common elements (tables, lists, inline formatting) generically.
/// A renderer is meant to be used for a single document.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    /// Open blockquotes; `None` is a plain quote, `Some` an alert.
    quote_stack: Vec<Option<AlertKind>>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(false),
            quote_stack: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Capture the first H1 heading as the document title.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.heading = HeadingState::new(true);
        self
    }

    /// Parser options: GitHub Flavored Markdown tables, strikethrough, task
    /// lists and alerts (`> [!NOTE]`).
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }

    /// Render markdown text with [`Self::parser_options`].
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(Parser::new_ext(markdown, Self::parser_options()))
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    /// Line breaks inside a heading separate words in its text.
    fn line_break(&mut self, html: &str) {
        if self.heading.is_active() {
            self.heading.push_text(" ");
        }
        self.push_inline(html);
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.line_break("\n"),
            Event::HardBreak => {
                let mut br = String::new();
                B::hard_break(&mut br);
                self.line_break(&br);
            }
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                let class = class_attr::<B>(Element::Paragraph);
                write!(self.output, "<p{class}>").unwrap();
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the ID is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(Some(kind)) => {
                let alert = AlertKind::from(kind);
                self.quote_stack.push(Some(alert));
                B::alert_start(alert, &mut self.output);
            }
            Tag::BlockQuote(None) => {
                self.quote_stack.push(None);
                B::blockquote_start(&mut self.output);
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang.map(str::to_owned));
            }
            Tag::List(start) => {
                let (element, tag) = match start {
                    Some(_) => (Element::OrderedList, "ol"),
                    None => (Element::UnorderedList, "ul"),
                };
                let class = class_attr::<B>(element);
                match start {
                    Some(n) if n != 1 => {
                        write!(self.output, r#"<{tag}{class} start="{n}">"#).unwrap();
                    }
                    _ => write!(self.output, "<{tag}{class}>").unwrap(),
                }
            }
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let href = B::transform_link(&dest_url);
                let mut link = format!(r#"<a href="{}""#, escape_html(&href));
                if !title.is_empty() {
                    write!(link, r#" title="{}""#, escape_html(&title)).unwrap();
                }
                link.push_str(&class_attr::<B>(Element::Link));
                link.push('>');
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as text events; the tag is written in end_tag.
                self.image.start(dest_url.into_string(), title.into_string());
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete_heading() {
                    let level = heading.level;
                    let class = class_attr::<B>(Element::Heading(level));
                    write!(
                        self.output,
                        r#"<h{level} id="{}"{class}>{}</h{level}>"#,
                        heading.id, heading.html
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(_) => match self.quote_stack.pop() {
                Some(Some(alert)) => B::alert_end(alert, &mut self.output),
                _ => B::blockquote_end(&mut self.output),
            },
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.end() {
                    let mut img = String::new();
                    B::image(&src, &alt, &title, &mut img);
                    self.push_inline(&img);
                }
            }
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        let class = class_attr::<B>(Element::InlineCode);
        let html = format!("<code{class}>{}</code>", escape_html(code));
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&html);
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Options, Parser};

    use super::*;
    use crate::StyledBackend;
    use crate::html::HtmlBackend;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    fn render_styled(markdown: &str) -> RenderResult {
        MarkdownRenderer::<StyledBackend>::new().render_markdown(markdown)
    }

    #[test]
    fn test_html_basic_paragraph() {
        let result = render_html("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_html_heading_with_id() {
        let result = render_html("## Section Title");
        assert_eq!(result.html, r#"<h2 id="section-title">Section Title</h2>"#);
        assert_eq!(result.toc.len(), 1);
        assert_eq!(result.toc[0].level, 2);
        assert_eq!(result.toc[0].title, "Section Title");
        assert_eq!(result.toc[0].id, "section-title");
    }

    #[test]
    fn test_title_extraction() {
        let markdown = "# Route Handlers\n\nSome content\n\n## GET";
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_title_extraction()
            .render_markdown(markdown);

        assert_eq!(result.title.as_deref(), Some("Route Handlers"));
        assert!(
            result
                .html
                .contains(r#"<h1 id="route-handlers">Route Handlers</h1>"#)
        );
        assert_eq!(result.toc.len(), 1);
        assert_eq!(result.toc[0].level, 2);
    }

    #[test]
    fn test_no_title_without_extraction() {
        let result = render_html("# Title");
        assert!(result.title.is_none());
    }

    #[test]
    fn test_html_code_block() {
        let result = render_html("```tsx title=\"app/page.tsx\"\nexport default function Page() {}\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-tsx\">export default function Page() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_indented_code_block_has_no_language() {
        let result = render_html("    npm run dev\n");
        assert!(result.html.starts_with("<pre><code>npm run dev"));
        assert!(!result.html.contains("class="));
    }

    #[test]
    fn test_code_block_escapes_content() {
        let result = render_html("```html\n<div>&</div>\n```");
        assert!(result.html.contains("&lt;div&gt;&amp;&lt;/div&gt;"));
    }

    #[test]
    fn test_html_blockquote() {
        let result = render_html("> Just a regular quote");
        assert_eq!(
            result.html,
            "<blockquote><p>Just a regular quote</p></blockquote>"
        );
    }

    #[test]
    fn test_note_alert() {
        let result = render_html("> [!NOTE]\n> This is a **note**.");
        assert!(result.html.starts_with(r#"<div class="alert alert-note">"#));
        assert!(result.html.contains("<strong>note</strong>"));
        assert!(result.html.ends_with("</div></div>"));
    }

    #[test]
    fn test_alert_with_nested_quote() {
        let result = render_html("> [!TIP]\n> Tip\n>\n> > quoted");
        assert!(result.html.contains("alert-tip"));
        assert!(result.html.contains("<blockquote><p>quoted</p></blockquote>"));
        assert!(result.html.ends_with("</blockquote></div></div>"));
    }

    #[test]
    fn test_html_image() {
        let result = render_html("![Alt `code` text](image.png)");
        assert_eq!(
            result.html,
            r#"<p><img src="image.png" alt="Alt code text"></p>"#
        );
    }

    #[test]
    fn test_html_table() {
        let result = render_html("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            result.html,
            concat!(
                "<table><thead><tr>",
                r#"<th style="text-align:left">A</th><th style="text-align:right">B</th>"#,
                "</tr></thead><tbody><tr>",
                r#"<td style="text-align:left">1</td><td style="text-align:right">2</td>"#,
                "</tr></tbody></table>"
            )
        );
    }

    #[test]
    fn test_md_link_rewritten_to_route() {
        let result = render_html("See [Link](./Link.md#prefetching).");
        assert_eq!(
            result.html,
            r#"<p>See <a href="/docs/Link#prefetching">Link</a>.</p>"#
        );
    }

    #[test]
    fn test_external_link_with_title() {
        let result = render_html(r#"[docs](https://nextjs.org "Next.js")"#);
        assert_eq!(
            result.html,
            r#"<p><a href="https://nextjs.org" title="Next.js">docs</a></p>"#
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render_html("## FAQ\n\n## FAQ\n\n## FAQ");
        let ids: Vec<_> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render_html("## Install `next`");
        assert_eq!(
            result.html,
            r#"<h2 id="install-next">Install <code>next</code></h2>"#
        );
        assert_eq!(result.toc[0].title, "Install next");
    }

    #[test]
    fn test_heading_with_link() {
        let result = render_html("## See [Layouts](Layouts.md)");
        assert_eq!(
            result.html,
            r#"<h2 id="see-layouts">See <a href="/docs/Layouts">Layouts</a></h2>"#
        );
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        let result = render_html("*italic*, **bold**, ~~gone~~");
        assert_eq!(
            result.html,
            "<p><em>italic</em>, <strong>bold</strong>, <s>gone</s></p>"
        );
    }

    #[test]
    fn test_lists() {
        let result = render_html("- Item 1\n- Item 2");
        assert_eq!(result.html, "<ul><li>Item 1</li><li>Item 2</li></ul>");

        let result = render_html("1. First\n2. Second");
        assert_eq!(result.html, "<ol><li>First</li><li>Second</li></ol>");

        let result = render_html("3. Third\n4. Fourth");
        assert!(result.html.starts_with(r#"<ol start="3">"#));
    }

    #[test]
    fn test_task_list() {
        let result = render_html("- [ ] Unchecked\n- [x] Checked");
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(
            result
                .html
                .contains(r#"<input type="checkbox" checked disabled>"#)
        );
    }

    #[test]
    fn test_raw_html_passes_through() {
        let result = render_html("<details><summary>More</summary>\n\nHidden\n\n</details>");
        assert!(result.html.contains("<details><summary>More</summary>"));
        assert!(result.html.contains("<p>Hidden</p>"));
        assert!(result.html.contains("</details>"));

        let result = render_html("Press <kbd>Ctrl</kbd>.");
        assert_eq!(result.html, "<p>Press <kbd>Ctrl</kbd>.</p>");
    }

    #[test]
    fn test_styled_elements() {
        let result = render_styled(
            "# Title\n\n## Section\n\n### Sub\n\nText with `code` and [a](Link.md).\n\n- one\n\n1. two",
        );
        let html = result.html;
        assert!(html.contains(r#"<h1 id="title" class="doc-h1">Title</h1>"#));
        assert!(html.contains(r#"<h2 id="section" class="doc-h2">Section</h2>"#));
        assert!(html.contains(r#"<h3 id="sub" class="doc-h3">Sub</h3>"#));
        assert!(html.contains(r#"<p class="doc-p">Text with <code class="doc-code">code</code>"#));
        assert!(html.contains(r#"<a href="/docs/Link" class="doc-link">a</a>"#));
        assert!(html.contains(r#"<ul class="doc-ul"><li>"#));
        assert!(html.contains(r#"<ol class="doc-ol"><li>"#));
    }

    #[test]
    fn test_styled_code_block_is_highlighted() {
        let result = render_styled("```js\nconst s = \"a\";\n```");
        assert!(
            result
                .html
                .starts_with(r#"<pre class="doc-pre"><code class="language-js doc-code"><span class="hl-source hl-js">"#)
        );
        assert!(result.html.contains("hl-string"));
    }

    #[test]
    fn test_heading_with_hard_break() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_title_extraction()
            .render_markdown("Foo\\\nBar\n===\n");
        assert_eq!(result.html, r#"<h1 id="foo-bar">Foo<br>Bar</h1>"#);
        assert_eq!(result.title.as_deref(), Some("Foo Bar"));
    }

    #[test]
    fn test_heading_with_soft_break() {
        let result = render_html("Getting\nStarted\n---\n");
        assert_eq!(result.html, "<h2 id=\"getting-started\">Getting\nStarted</h2>");
        assert_eq!(result.toc[0].title, "Getting Started");
    }

    #[test]
    fn test_paragraph_hard_break() {
        let result = render_html("one  \ntwo");
        assert_eq!(result.html, "<p>one<br>two</p>");
    }

    #[test]
    fn test_styled_deep_heading_unclassed() {
        let result = render_styled("#### Deep");
        assert_eq!(result.html, r#"<h4 id="deep">Deep</h4>"#);
    }

    #[test]
    fn test_render_with_external_parser() {
        let parser = Parser::new_ext("Hello", Options::empty());
        let result = MarkdownRenderer::<HtmlBackend>::default().render(parser);
        assert_eq!(result.html, "<p>Hello</p>");
    }

    #[test]
    fn test_parser_options() {
        let options = MarkdownRenderer::<HtmlBackend>::parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_GFM));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));
    }}
