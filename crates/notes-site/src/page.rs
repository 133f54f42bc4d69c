//! Page rendering results and errors.

use notes_registry::Slug;
use notes_storage::StorageError;

/// Result of rendering a note.
#[derive(Clone, Debug)]
pub struct PageRenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title from the first H1 heading, if the note has one.
    pub title: Option<String>,
    /// Source file modification time (Unix timestamp).
    pub source_mtime: f64,
}

/// Error returned when page rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No markdown file exists for the slug.
    #[error("File not found: {slug}.md")]
    NotFound {
        /// Requested slug.
        slug: String,
    },
    /// The note exists but could not be read.
    #[error("Failed to read note {slug}: {source}")]
    Io {
        /// Requested slug.
        slug: String,
        /// Storage failure.
        #[source]
        source: StorageError,
    },
}

impl RenderError {
    /// Classify a storage failure for `slug`.
    pub(crate) fn from_storage(slug: &Slug, source: StorageError) -> Self {
        if source.is_not_found() {
            Self::NotFound {
                slug: slug.to_string(),
            }
        } else {
            Self::Io {
                slug: slug.to_string(),
                source,
            }
        }
    }

    /// Whether the error means there is no such page (as opposed to a failed read).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Message shown in place of a note that has no markdown file.
#[must_use]
pub fn not_found_message(slug: &str) -> String {
    format!("File not found: {slug}.md")
}

/// Outcome of requesting a note page.
///
/// A missing note is an ordinary outcome, not an error: it is shown inline
/// as a message naming the slug.
#[derive(Clone, Debug)]
pub enum PageOutcome {
    /// The note was rendered.
    Rendered {
        /// Parsed slug.
        slug: Slug,
        /// Rendering result.
        page: PageRenderResult,
    },
    /// No note exists for the requested slug.
    Missing {
        /// Requested slug, as given.
        slug: String,
        /// User-visible message (`File not found: {slug}.md`).
        message: String,
    },
}

impl PageOutcome {
    pub(crate) fn missing(slug: &str) -> Self {
        Self::Missing {
            slug: slug.to_owned(),
            message: not_found_message(slug),
        }
    }

    /// Whether the note was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}
