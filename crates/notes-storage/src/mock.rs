//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use notes_registry::Slug;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores note contents in memory. Use the builder methods to configure the
/// mock with test data, and [`MockStorage::set_note`] /
/// [`MockStorage::remove_note`] to change it after it has been shared.
///
/// # Example
///
/// ```
/// use notes_registry::Slug;
/// use notes_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_note("Headers", "# Headers");
///
/// assert_eq!(storage.read(&Slug::from_file("Headers.md")).unwrap(), "# Headers");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    notes: RwLock<BTreeMap<String, Note>>,
    scan_error: RwLock<bool>,
}

#[derive(Debug, Clone)]
struct Note {
    content: String,
    mtime: f64,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note with the given slug and markdown content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_note(self, slug: impl Into<String>, content: impl Into<String>) -> Self {
        self.set_note(slug, content);
        self
    }

    /// Set modification time for an existing note.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, slug: &str, mtime: f64) -> Self {
        if let Some(note) = self.notes.write().unwrap().get_mut(slug) {
            note.mtime = mtime;
        }
        self
    }

    /// Make [`Storage::scan`] fail, as if the notes directory were missing.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_scan_error(self) -> Self {
        *self.scan_error.write().unwrap() = true;
        self
    }

    /// Insert or replace a note.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_note(&self, slug: impl Into<String>, content: impl Into<String>) {
        let mut notes = self.notes.write().unwrap();
        let slug = slug.into();
        let mtime = notes.get(&slug).map_or(0.0, |n| n.mtime + 1.0);
        notes.insert(
            slug,
            Note {
                content: content.into(),
                mtime,
            },
        );
    }

    /// Remove a note.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_note(&self, slug: &str) {
        self.notes.write().unwrap().remove(slug);
    }

    fn get(&self, slug: &Slug) -> Result<Note, StorageError> {
        self.notes
            .read()
            .unwrap()
            .get(slug.as_str())
            .cloned()
            .ok_or_else(|| StorageError::not_found(slug.file_name()).with_backend(BACKEND))
    }
}

impl Storage for MockStorage {
    fn read(&self, slug: &Slug) -> Result<String, StorageError> {
        self.get(slug).map(|note| note.content)
    }

    fn exists(&self, slug: &Slug) -> bool {
        self.notes.read().unwrap().contains_key(slug.as_str())
    }

    fn mtime(&self, slug: &Slug) -> Result<f64, StorageError> {
        self.get(slug).map(|note| note.mtime)
    }

    fn scan(&self) -> Result<Vec<Slug>, StorageError> {
        if *self.scan_error.read().unwrap() {
            return Err(StorageError::new(StorageErrorKind::NotFound).with_backend(BACKEND));
        }
        Ok(self
            .notes
            .read()
            .unwrap()
            .keys()
            .filter_map(|slug| Slug::parse(slug).ok())
            .collect())
    }
}
