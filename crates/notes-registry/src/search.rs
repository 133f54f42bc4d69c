//! Case-insensitive filtering over the registry.
//!
//! Filtering is recomputed from scratch for every query. With tens of items a
//! linear scan is all that is needed, so there is no index structure.

use serde::Serialize;

use crate::registry::{DocGroup, DocItem, Registry};
use crate::slug::Slug;

/// A group reduced to the items matching a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredGroup<'a> {
    /// Group title.
    pub title: &'a str,
    /// Matching items, in declared order. Never empty.
    pub items: Vec<&'a DocItem>,
}

/// A document flattened with its group, as shown on landing page cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    /// Display name.
    pub title: String,
    /// Route path (`/docs/{slug}`).
    pub href: String,
    /// Title of the owning group.
    pub group: String,
    /// Document slug.
    pub slug: Slug,
}

impl DocEntry {
    fn new(group: &DocGroup, item: &DocItem) -> Self {
        let slug = item.slug();
        Self {
            title: item.name.clone(),
            href: slug.href(),
            group: group.title.clone(),
            slug,
        }
    }
}

/// Whether `name` contains `query`, ignoring case.
///
/// An empty query matches every name.
#[must_use]
pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

impl Registry {
    /// Filter groups by a case-insensitive substring match on item names.
    ///
    /// Groups with no matching items are left out entirely rather than
    /// returned empty. An empty query returns every group and item in
    /// declared order.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<FilteredGroup<'_>> {
        let query = query.to_lowercase();
        self.groups()
            .iter()
            .filter_map(|group| {
                let items: Vec<&DocItem> = group
                    .items
                    .iter()
                    .filter(|item| matches_query(&item.name, &query))
                    .collect();
                (!items.is_empty()).then_some(FilteredGroup {
                    title: &group.title,
                    items,
                })
            })
            .collect()
    }

    /// All documents flattened with their group title, in declared order.
    #[must_use]
    pub fn entries(&self) -> Vec<DocEntry> {
        self.iter_items()
            .map(|(group, item)| DocEntry::new(group, item))
            .collect()
    }

    /// Flattened documents whose name matches `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<DocEntry> {
        self.iter_items()
            .filter(|(_, item)| matches_query(&item.name, query))
            .map(|(group, item)| DocEntry::new(group, item))
            .collect()
    }

    /// The first `count` documents in declared order.
    #[must_use]
    pub fn popular(&self, count: usize) -> Vec<DocEntry> {
        self.iter_items()
            .take(count)
            .map(|(group, item)| DocEntry::new(group, item))
            .collect()
    }
}
