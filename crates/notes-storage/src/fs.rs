//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading notes from a flat directory of
//! markdown files.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use notes_registry::{MARKDOWN_EXTENSION, Slug};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// A note with slug `Headers` lives at `{source_dir}/Headers.md`. The
/// directory is flat: subdirectories are ignored by [`Storage::scan`].
///
/// # Example
///
/// ```no_run
/// use notes_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new("notes".into());
/// let slugs = storage.scan()?;
/// # Ok::<(), notes_storage::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory containing the markdown files.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve a slug to its file, rejecting anything but a single path segment.
    fn file_path(&self, slug: &Slug) -> Result<PathBuf, StorageError> {
        let relative = PathBuf::from(slug.file_name());
        let mut components = relative.components();
        let single_segment = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();

        if !single_segment {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(relative)
                .with_backend(BACKEND));
        }
        Ok(self.source_dir.join(relative))
    }
}

impl Storage for FsStorage {
    fn read(&self, slug: &Slug) -> Result<String, StorageError> {
        let full_path = self.file_path(slug)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, slug: &Slug) -> bool {
        self.file_path(slug).is_ok_and(|path| path.is_file())
    }

    fn mtime(&self, slug: &Slug) -> Result<f64, StorageError> {
        let full_path = self.file_path(slug)?;
        let metadata = fs::metadata(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }

    fn scan(&self) -> Result<Vec<Slug>, StorageError> {
        let entries = fs::read_dir(&self.source_dir).map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        let mut slugs: Vec<Slug> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.') && name.ends_with(MARKDOWN_EXTENSION))
            .filter_map(|name| Slug::parse(Slug::from_file(&name).as_str()).ok())
            .collect();

        slugs.sort();
        tracing::debug!(count = slugs.len(), dir = %self.source_dir.display(), "Scanned notes");
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Headers.md"), "# Headers\n\nContent.").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let content = storage.read(&slug("Headers")).unwrap();

        assert_eq!(content, "# Headers\n\nContent.");
    }

    #[test]
    fn test_read_sees_edits_without_restart() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("Link.md");
        fs::write(&path, "first").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        assert_eq!(storage.read(&slug("Link")).unwrap(), "first");

        fs::write(&path, "second").unwrap();
        assert_eq!(storage.read(&slug("Link")).unwrap(), "second");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read(&slug("Missing")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path, Some(temp_dir.path().join("Missing.md")));
    }

    #[test]
    fn test_read_rejects_unparsed_slug_with_separator() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read(&Slug::from_file("../secret.md")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Link.md"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("Dir.md")).unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.exists(&slug("Link")));
        assert!(!storage.exists(&slug("Missing")));
        assert!(!storage.exists(&slug("Dir")));
        assert!(!storage.exists(&Slug::from_file("../Link.md")));
    }

    #[test]
    fn test_mtime_returns_modification_time() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Link.md"), "x").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let mtime = storage.mtime(&slug("Link")).unwrap();

        assert!(mtime > 0.0);
    }

    #[test]
    fn test_mtime_missing_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.mtime(&slug("Missing")).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_scan_lists_markdown_files_sorted() {
        let temp_dir = create_test_dir();
        for name in ["Route-Group.md", "Headers.md", "catch-all-segment.md"] {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let slugs = storage.scan().unwrap();

        assert_eq!(
            slugs,
            vec![
                slug("Headers"),
                slug("Route-Group"),
                slug("catch-all-segment")
            ]
        );
    }

    #[test]
    fn test_scan_skips_other_entries() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Link.md"), "x").unwrap();
        fs::write(temp_dir.path().join(".draft.md"), "x").unwrap();
        fs::write(temp_dir.path().join("registry.toml"), "x").unwrap();
        fs::write(temp_dir.path().join("notes.md.bak"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested/Deep.md"), "x").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let slugs = storage.scan().unwrap();

        assert_eq!(slugs, vec![slug("Link")]);
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/notes"));
        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }
}
