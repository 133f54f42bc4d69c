//! Storage abstraction for markdown notes.
//!
//! This crate provides a [`Storage`] trait that maps note [`Slug`]s to their
//! markdown source. Site logic only ever talks to the trait, so it can be
//! tested against [`MockStorage`] without touching the filesystem.
//!
//! # Architecture
//!
//! - [`Storage`] trait with `read()`, `exists()`, `mtime()` and `scan()`
//! - [`FsStorage`] reading `{source_dir}/{slug}.md`
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use notes_registry::Slug;
//! use notes_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new("notes".into());
//! let markdown = storage.read(&Slug::from_file("Headers.md"))?;
//! # Ok::<(), notes_storage::StorageError>(())
//! ```
//!
//! [`Slug`]: notes_registry::Slug

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
