//! Registry loading and validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::slug::{MARKDOWN_EXTENSION, Slug, SlugError};

/// A single document entry: display name plus backing filename.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocItem {
    /// Display name shown in navigation and on cards.
    pub name: String,
    /// Markdown filename (e.g., "Headers.md").
    pub file: String,
}

impl DocItem {
    /// Slug derived from the filename.
    #[must_use]
    pub fn slug(&self) -> Slug {
        Slug::from_file(&self.file)
    }
}

/// Named collection of documents, rendered as one sidebar section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocGroup {
    /// Section title.
    pub title: String,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<DocItem>,
}

/// On-disk shape of the registry file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    groups: Vec<DocGroup>,
}

/// Error returned when the registry cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Registry file could not be read.
    #[error("Failed to read registry {}: {source}", path.display())]
    Io {
        /// Registry file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry file is not valid TOML or has unexpected keys.
    #[error("Registry parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Registry declares no groups.
    #[error("Registry must declare at least one group")]
    Empty,
    /// A group has an empty title.
    #[error("Group #{index} has an empty title")]
    EmptyGroupTitle {
        /// Zero-based position of the group.
        index: usize,
    },
    /// Two groups share a title.
    #[error("Duplicate group title: {0}")]
    DuplicateGroup(String),
    /// An item has an empty display name.
    #[error("Item {file:?} in group {group:?} has an empty name")]
    EmptyItemName {
        /// Group title.
        group: String,
        /// Item filename.
        file: String,
    },
    /// An item's file is not a markdown filename.
    #[error("Item {name:?} refers to {file:?}, expected a .md file")]
    NotMarkdown {
        /// Item display name.
        name: String,
        /// Offending filename.
        file: String,
    },
    /// An item's filename does not yield a usable slug.
    #[error("Item {name:?} has an invalid file {file:?}: {source}")]
    InvalidSlug {
        /// Item display name.
        name: String,
        /// Offending filename.
        file: String,
        /// Why the derived slug was rejected.
        #[source]
        source: SlugError,
    },
    /// Two items derive the same slug.
    #[error("Duplicate slug {slug:?} used by {first:?} and {second:?}")]
    DuplicateSlug {
        /// Shared slug.
        slug: Slug,
        /// Name of the first item using it.
        first: String,
        /// Name of the second item using it.
        second: String,
    },
}

/// Validated catalog of document groups.
///
/// Group and item order is display order. Every item's slug is unique, so a
/// slug identifies at most one item.
#[derive(Clone, Debug)]
pub struct Registry {
    groups: Vec<DocGroup>,
    /// Slug to (group index, item index).
    index: HashMap<Slug, (usize, usize)>,
}

impl Registry {
    /// Build a registry from groups, validating them.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] describing the first rule the groups violate.
    pub fn new(groups: Vec<DocGroup>) -> Result<Self, RegistryError> {
        if groups.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut titles: HashMap<&str, usize> = HashMap::new();
        let mut index: HashMap<Slug, (usize, usize)> = HashMap::new();

        for (group_idx, group) in groups.iter().enumerate() {
            if group.title.trim().is_empty() {
                return Err(RegistryError::EmptyGroupTitle { index: group_idx });
            }
            if titles.insert(group.title.as_str(), group_idx).is_some() {
                return Err(RegistryError::DuplicateGroup(group.title.clone()));
            }

            for (item_idx, item) in group.items.iter().enumerate() {
                let slug = validate_item(group, item)?;
                if let Some(&(g, i)) = index.get(&slug) {
                    return Err(RegistryError::DuplicateSlug {
                        slug,
                        first: groups[g].items[i].name.clone(),
                        second: item.name.clone(),
                    });
                }
                index.insert(slug, (group_idx, item_idx));
            }
        }

        Ok(Self { groups, index })
    }

    /// Parse and validate a registry from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed TOML or unknown keys,
    /// and a validation variant for rule violations.
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = toml::from_str(content)?;
        Self::new(file.groups)
    }

    /// Load and validate a registry file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            groups = registry.groups.len(),
            items = registry.len(),
            "Loaded registry"
        );
        Ok(registry)
    }

    /// Groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[DocGroup] {
        &self.groups
    }

    /// All items with their group, in display order.
    pub fn iter_items(&self) -> impl Iterator<Item = (&DocGroup, &DocItem)> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().map(move |item| (group, item)))
    }

    /// Look up the item registered under `slug`.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<(&DocGroup, &DocItem)> {
        let &(g, i) = self.index.get(slug)?;
        let group = &self.groups[g];
        Some((group, &group.items[i]))
    }

    /// Whether `slug` is registered.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    /// All registered slugs in display order.
    #[must_use]
    pub fn slugs(&self) -> Vec<Slug> {
        self.iter_items().map(|(_, item)| item.slug()).collect()
    }

    /// Total number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the registry has no items (groups may still exist).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Check one item and return its slug.
fn validate_item(group: &DocGroup, item: &DocItem) -> Result<Slug, RegistryError> {
    if item.name.trim().is_empty() {
        return Err(RegistryError::EmptyItemName {
            group: group.title.clone(),
            file: item.file.clone(),
        });
    }
    let Some(stem) = item.file.strip_suffix(MARKDOWN_EXTENSION) else {
        return Err(RegistryError::NotMarkdown {
            name: item.name.clone(),
            file: item.file.clone(),
        });
    };
    Slug::parse(stem).map_err(|source| RegistryError::InvalidSlug {
        name: item.name.clone(),
        file: item.file.clone(),
        source,
    })
}
