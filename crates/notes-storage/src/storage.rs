//! Storage trait and error types.
//!
//! Every method takes a [`Slug`], never a file path. Backends decide how a
//! slug maps to their own layout.

use std::path::PathBuf;

use notes_registry::Slug;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Note or directory does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Slug would resolve outside the notes directory.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Whether this error means the note is simply absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Source of markdown notes.
///
/// Reads are not cached: every call goes to the backend, so edits to a note
/// are visible on the next request.
pub trait Storage: Send + Sync {
    /// Read the markdown source of a note.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind [`StorageErrorKind::NotFound`] if
    /// the note does not exist, or another kind if it can't be read.
    fn read(&self, slug: &Slug) -> Result<String, StorageError>;

    /// Check whether a note exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, slug: &Slug) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the note doesn't exist or mtime can't be retrieved.
    fn mtime(&self, slug: &Slug) -> Result<f64, StorageError>;

    /// List every note present in the backend, sorted by slug.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend can't be listed (e.g., the
    /// notes directory is missing).
    fn scan(&self) -> Result<Vec<Slug>, StorageError>;
}
