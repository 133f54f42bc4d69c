//! State tracked while walking markdown events.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Buffered fenced or indented code block.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Column alignments and position within the current table.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current cell, or an empty string.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Image whose alt text is still being collected.
#[derive(Default)]
pub(crate) struct ImageState {
    pending: Option<(String, String)>,
    alt_text: String,
}

impl ImageState {
    /// Start capturing alt text for an image with the given source and title.
    pub(crate) fn start(&mut self, src: String, title: String) {
        self.pending = Some((src, title));
        self.alt_text.clear();
    }

    /// Finish capture, returning (src, title, alt).
    pub(crate) fn end(&mut self) -> Option<(String, String, String)> {
        let (src, title) = self.pending.take()?;
        Some((src, title, std::mem::take(&mut self.alt_text)))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading that has been fully collected.
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// Heading text collection, ID generation and title capture.
pub(crate) struct HeadingState {
    extract_title: bool,
    title: Option<String>,
    current_level: Option<u8>,
    /// Plain text, used for the ID and the table of contents.
    text: String,
    /// Inner HTML, with inline formatting.
    html: String,
    toc: Vec<TocEntry>,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(extract_title: bool) -> Self {
        Self {
            extract_title,
            title: None,
            current_level: None,
            text: String::new(),
            html: String::new(),
            toc: Vec::new(),
            id_counts: HashMap::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Finish the current heading.
    ///
    /// The first H1 becomes the title when extraction is on. Every other
    /// heading below H1 is added to the table of contents.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let title = text.trim();
        let id = self.generate_id(title);

        if level == 1 {
            if self.extract_title && self.title.is_none() {
                self.title = Some(title.to_owned());
            }
        } else {
            self.toc.push(TocEntry {
                level,
                title: title.to_owned(),
                id: id.clone(),
            });
        }

        Some(CompletedHeading {
            level,
            id,
            html: html.trim().to_owned(),
        })
    }

    fn generate_id(&mut self, text: &str) -> String {
        let base_id = match slugify(text) {
            id if id.is_empty() => "section".to_owned(),
            id => id,
        };
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert heading text to an anchor ID.
///
/// Lowercases letters and digits (Unicode aware), collapses runs of
/// whitespace, `-` and `_` into a single dash, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
