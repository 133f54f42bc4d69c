//! Render backend trait for format-specific rendering.
//!
//! The renderer walks markdown events and delegates the elements whose
//! output differs between backends: code blocks, blockquotes and alerts,
//! images, link targets, and the class attached to each styled element.

use std::borrow::Cow;

use pulldown_cmark::BlockQuoteKind;

/// GitHub-style alert kind (`> [!NOTE]`, `> [!TIP]`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// Lowercase name, used in CSS classes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Title shown above the alert body.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Element kinds a backend may attach a presentational class to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// Heading of the given level (1-6).
    Heading(u8),
    Paragraph,
    /// Code span inside running text.
    InlineCode,
    /// The `<pre>` wrapper of a code block.
    Pre,
    /// The `<code>` inside a code block.
    BlockCode,
    Link,
    UnorderedList,
    OrderedList,
}

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// CSS class for an element, or `None` for no class attribute.
    ///
    /// Default renders every element unstyled.
    fn class(_element: Element) -> Option<&'static str> {
        None
    }

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "tsx", "bash")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    /// Render the opening of a GitHub-style alert.
    fn alert_start(kind: AlertKind, out: &mut String);

    /// Render the closing of a GitHub-style alert.
    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</div></div>");
    }

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Transform a link URL.
    ///
    /// Default implementation returns the URL unchanged.
    #[must_use]
    fn transform_link(url: &str) -> Cow<'_, str> {
        Cow::Borrowed(url)
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}

/// Render ` class="..."` for an element, or nothing when the backend has no class.
pub(crate) fn class_attr<B: RenderBackend>(element: Element) -> String {
    B::class(element).map_or_else(String::new, |class| format!(r#" class="{class}""#))
}
