//! Document registry for the notes documentation browser.
//!
//! The registry is the catalog of document groups shown in the sidebar and on
//! the landing page. It is loaded from a TOML file rather than compiled in, so
//! there is exactly one authoritative copy of the grouping:
//!
//! ```toml
//! [[groups]]
//! title = "Routing"
//!
//! [[groups.items]]
//! name = "Link"
//! file = "Link.md"
//! ```
//!
//! Loading validates the file: group titles and item names must be non-empty,
//! every `file` must be a `.md` filename, and the derived [`Slug`]s must be
//! unique across the whole registry.
//!
//! # Example
//!
//! ```
//! use notes_registry::Registry;
//!
//! let registry = Registry::from_toml_str(
//!     r#"
//! [[groups]]
//! title = "API and Headers"
//!
//! [[groups.items]]
//! name = "Headers"
//! file = "Headers.md"
//! "#,
//! )
//! .unwrap();
//!
//! let groups = registry.filter("HEAD");
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].items[0].slug().as_str(), "Headers");
//! ```

mod registry;
mod search;
mod slug;

pub use registry::{DocGroup, DocItem, Registry, RegistryError};
pub use search::{DocEntry, FilteredGroup, matches_query};
pub use slug::{DOCS_ROUTE_PREFIX, MARKDOWN_EXTENSION, Slug, SlugError};
