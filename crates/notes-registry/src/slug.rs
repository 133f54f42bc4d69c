//! Slugs: routing keys derived from note filenames.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Extension every note file carries.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Route prefix under which notes are served.
pub const DOCS_ROUTE_PREFIX: &str = "/docs/";

/// Error returned when a string is not a usable slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    /// Slug is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// Slug contains a character that cannot appear in a single path segment.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// Slug is a relative path component or a hidden file name.
    #[error("slug cannot start with '.'")]
    LeadingDot,
}

/// URL-safe identifier of a note.
///
/// A slug is the note's filename with the `.md` extension removed, and is used
/// both as the route key (`/docs/{slug}`) and to locate the file on disk
/// (`{slug}.md`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a note filename.
    ///
    /// Only a trailing `.md` is stripped, so deriving twice yields the same slug.
    ///
    /// ```
    /// use notes_registry::Slug;
    ///
    /// assert_eq!(Slug::from_file("Headers.md").as_str(), "Headers");
    /// assert_eq!(Slug::from_file("Headers").as_str(), "Headers");
    /// ```
    #[must_use]
    pub fn from_file(file: &str) -> Self {
        Self(
            file.strip_suffix(MARKDOWN_EXTENSION)
                .unwrap_or(file)
                .to_owned(),
        )
    }

    /// Parse a slug taken from a route parameter.
    ///
    /// Rejects anything that would escape the notes directory when joined
    /// onto it: path separators, NUL bytes, and leading dots.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if `raw` is empty or not a single safe segment.
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }
        if raw.starts_with('.') {
            return Err(SlugError::LeadingDot);
        }
        if let Some(c) = raw.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(SlugError::InvalidCharacter(c));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Extract the slug from a `/docs/{slug}` route path.
    ///
    /// Returns `None` for paths outside the docs route or with an invalid slug.
    #[must_use]
    pub fn from_route(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(DOCS_ROUTE_PREFIX)?;
        Self::parse(rest.trim_end_matches('/')).ok()
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename of the note backing this slug (`{slug}.md`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{MARKDOWN_EXTENSION}", self.0)
    }

    /// Route path of the note (`/docs/{slug}`).
    #[must_use]
    pub fn href(&self) -> String {
        format!("{DOCS_ROUTE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
