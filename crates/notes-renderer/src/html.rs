//! HTML backends for markdown rendering.
//!
//! [`StyledBackend`] produces semantic HTML5 with the note theme's classes
//! attached to headings, paragraphs, code, links and lists, and highlights
//! fenced code blocks.

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::{AlertKind, Element, RenderBackend, class_attr};
use crate::highlight::highlight;
use crate::state::escape_html;

/// Unstyled backend for checking the generic event handling.
#[cfg(test)]
pub(crate) struct HtmlBackend;

#[cfg(test)]
impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        write_code_block::<Self>(lang, &escape_html(content), out);
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        write_alert_start(kind, out);
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        write_image(src, alt, title, out);
    }

    fn transform_link(url: &str) -> Cow<'_, str> {
        resolve_link(url)
    }
}

/// Themed HTML render backend.
///
/// Produces:
/// - a fixed presentational class per element kind, defined by the bundled
///   stylesheet
/// - `<pre><code class="language-*">` for code blocks, with `hl-*` token
///   spans when the language has a grammar
/// - `<blockquote>` for blockquotes, `<div class="alert">` for alerts
/// - `.md` links rewritten to `/docs/{slug}` routes
pub struct StyledBackend;

impl RenderBackend for StyledBackend {
    fn class(element: Element) -> Option<&'static str> {
        match element {
            Element::Heading(1) => Some("doc-h1"),
            Element::Heading(2) => Some("doc-h2"),
            Element::Heading(3) => Some("doc-h3"),
            Element::Heading(_) => None,
            Element::Paragraph => Some("doc-p"),
            Element::InlineCode | Element::BlockCode => Some("doc-code"),
            Element::Pre => Some("doc-pre"),
            Element::Link => Some("doc-link"),
            Element::UnorderedList => Some("doc-ul"),
            Element::OrderedList => Some("doc-ol"),
        }
    }

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        let body = lang
            .and_then(|lang| highlight(lang, content))
            .unwrap_or_else(|| escape_html(content));
        write_code_block::<Self>(lang, &body, out);
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        write_alert_start(kind, out);
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        write_image(src, alt, title, out);
    }

    fn transform_link(url: &str) -> Cow<'_, str> {
        resolve_link(url)
    }
}

/// Write `<pre><code>` around already escaped `body`, with the language class
/// first, then the backend's classes.
fn write_code_block<B: RenderBackend>(lang: Option<&str>, body: &str, out: &mut String) {
    let mut classes: Vec<String> = Vec::with_capacity(2);
    if let Some(lang) = lang {
        classes.push(format!("language-{}", escape_html(lang)));
    }
    if let Some(class) = B::class(Element::BlockCode) {
        classes.push(class.to_owned());
    }

    out.push_str("<pre");
    out.push_str(&class_attr::<B>(Element::Pre));
    out.push_str("><code");
    if !classes.is_empty() {
        write!(out, r#" class="{}""#, classes.join(" ")).unwrap();
    }
    write!(out, ">{body}</code></pre>").unwrap();
}

fn write_alert_start(kind: AlertKind, out: &mut String) {
    write!(
        out,
        r#"<div class="alert alert-{}"><div class="alert-title">{}</div><div class="alert-content">"#,
        kind.as_str(),
        kind.title()
    )
    .unwrap();
}

fn write_image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

/// Rewrite a link to another note into its `/docs/{slug}` route.
///
/// Notes live in one flat directory, so only the final path segment of a
/// `.md` link matters:
/// - `Link.md` → `/docs/Link`
/// - `./Route-Handlers.md#get` → `/docs/Route-Handlers#get`
/// - `../notes/Headers.md` → `/docs/Headers`
///
/// External links, fragment-only links and non-markdown links are returned
/// unchanged.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
pub fn resolve_link(url: &str) -> Cow<'_, str> {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
    {
        return Cow::Borrowed(url);
    }

    let (path_part, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };

    let Some(stem) = path_part.strip_suffix(".md") else {
        return Cow::Borrowed(url);
    };
    let file = stem.rsplit('/').next().unwrap_or(stem);
    if file.is_empty() || file.starts_with('.') {
        return Cow::Borrowed(url);
    }

    Cow::Owned(format!("/docs/{file}{fragment}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("tsx"), "const x = <div />;", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-tsx">const x = &lt;div /&gt;;</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "npm run dev", &mut out);
        assert_eq!(out, "<pre><code>npm run dev</code></pre>");
    }

    #[test]
    fn test_styled_code_block_highlights() {
        let mut out = String::new();
        StyledBackend::code_block(Some("bash"), "npm run build\n", &mut out);
        assert!(out.starts_with(r#"<pre class="doc-pre"><code class="language-bash doc-code"><span class="hl-source"#));
        assert!(out.ends_with("</code></pre>"));
        assert!(out.contains("npm"));
    }

    #[test]
    fn test_styled_code_block_unknown_language_is_escaped() {
        let mut out = String::new();
        StyledBackend::code_block(Some("mermaid"), "A --> B", &mut out);
        assert_eq!(
            out,
            r#"<pre class="doc-pre"><code class="language-mermaid doc-code">A --&gt; B</code></pre>"#
        );
    }

    #[test]
    fn test_styled_code_block_without_language() {
        let mut out = String::new();
        StyledBackend::code_block(None, "x", &mut out);
        assert_eq!(
            out,
            r#"<pre class="doc-pre"><code class="doc-code">x</code></pre>"#
        );
    }

    #[test]
    fn test_blockquote_default() {
        let mut out = String::new();
        HtmlBackend::blockquote_start(&mut out);
        out.push_str("content");
        HtmlBackend::blockquote_end(&mut out);
        assert_eq!(out, "<blockquote>content</blockquote>");
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "", &mut out);
        assert_eq!(out, r#"<img src="image.png" alt="Alt text">"#);
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt \"text\"", "Title", &mut out);
        assert_eq!(
            out,
            r#"<img src="image.png" title="Title" alt="Alt &quot;text&quot;">"#
        );
    }

    #[test]
    fn test_alert() {
        let mut out = String::new();
        StyledBackend::alert_start(AlertKind::Warning, &mut out);
        out.push_str("<p>careful</p>");
        StyledBackend::alert_end(AlertKind::Warning, &mut out);
        assert_eq!(
            out,
            r#"<div class="alert alert-warning"><div class="alert-title">Warning</div><div class="alert-content"><p>careful</p></div></div>"#
        );
    }

    #[test]
    fn test_plain_backend_has_no_classes() {
        for element in [
            Element::Heading(1),
            Element::Paragraph,
            Element::InlineCode,
            Element::Pre,
            Element::Link,
            Element::UnorderedList,
        ] {
            assert_eq!(HtmlBackend::class(element), None);
        }
    }

    #[test]
    fn test_styled_backend_only_styles_top_headings() {
        assert_eq!(StyledBackend::class(Element::Heading(2)), Some("doc-h2"));
        assert_eq!(StyledBackend::class(Element::Heading(4)), None);
    }

    #[test]
    fn test_resolve_link_plain_file() {
        assert_eq!(resolve_link("Link.md"), "/docs/Link");
    }

    #[test]
    fn test_resolve_link_current_dir_with_fragment() {
        assert_eq!(
            resolve_link("./Route-Handlers.md#get"),
            "/docs/Route-Handlers#get"
        );
    }

    #[test]
    fn test_resolve_link_keeps_last_segment() {
        assert_eq!(resolve_link("../notes/Headers.md"), "/docs/Headers");
        assert_eq!(resolve_link("/Headers.md"), "/docs/Headers");
    }

    #[test]
    fn test_resolve_link_external_unchanged() {
        assert_eq!(
            resolve_link("https://nextjs.org/docs/README.md"),
            "https://nextjs.org/docs/README.md"
        );
        assert_eq!(resolve_link("mailto:me@example.com"), "mailto:me@example.com");
    }

    #[test]
    fn test_resolve_link_fragment_only() {
        assert_eq!(resolve_link("#section"), "#section");
    }

    #[test]
    fn test_resolve_link_non_md_unchanged() {
        assert_eq!(resolve_link("./diagram.png"), "./diagram.png");
        assert_eq!(resolve_link("/docs/Link"), "/docs/Link");
    }

    #[test]
    fn test_resolve_link_rejects_hidden_or_empty() {
        assert_eq!(resolve_link(".md"), ".md");
        assert_eq!(resolve_link("dir/.secret.md"), "dir/.secret.md");
    }

    #[test]
    fn test_resolve_link_borrows_when_unchanged() {
        assert!(matches!(resolve_link("#x"), Cow::Borrowed(_)));
        assert!(matches!(resolve_link("Link.md"), Cow::Owned(_)));
    }
}
