//! Sidebar navigation view.
//!
//! Navigation is rebuilt for every request from the registry and an explicit
//! [`NavState`]. Nothing about the sidebar lives in shared state.

use notes_registry::{Registry, Slug};

/// Per-request sidebar state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    /// Search query; empty shows every item.
    pub query: String,
    /// Whether the sidebar is expanded on narrow screens.
    pub sidebar_open: bool,
}

impl NavState {
    /// State with the given query and the sidebar closed.
    #[must_use]
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sidebar_open: false,
        }
    }

    /// Expand the sidebar.
    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }
}

/// Navigation item (a link to one note).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Display name.
    pub title: String,
    /// Link target (`/docs/{slug}`).
    pub href: String,
    /// Note slug.
    pub slug: Slug,
    /// Whether this item is the page being viewed.
    pub is_active: bool,
}

/// Sidebar section with at least one item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    /// Section title.
    pub title: String,
    /// Items matching the query, in declared order.
    pub items: Vec<NavItem>,
}

/// Filtered sidebar for one page view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Groups with at least one matching item.
    pub groups: Vec<NavGroup>,
    /// Query the groups were filtered with.
    pub query: String,
    /// Whether the sidebar is expanded.
    pub sidebar_open: bool,
}

impl Navigation {
    /// Build the sidebar for `state`, marking `active` by exact slug equality.
    #[must_use]
    pub fn build(registry: &Registry, state: &NavState, active: Option<&Slug>) -> Self {
        let groups = registry
            .filter(&state.query)
            .into_iter()
            .map(|group| NavGroup {
                title: group.title.to_owned(),
                items: group
                    .items
                    .into_iter()
                    .map(|item| {
                        let slug = item.slug();
                        NavItem {
                            title: item.name.clone(),
                            href: slug.href(),
                            is_active: active == Some(&slug),
                            slug,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            groups,
            query: state.query.clone(),
            sidebar_open: state.sidebar_open,
        }
    }

    /// Whether no item matched the query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The highlighted item, if it survived filtering.
    #[must_use]
    pub fn active_item(&self) -> Option<&NavItem> {
        self.groups
            .iter()
            .flat_map(|g| &g.items)
            .find(|item| item.is_active)
    }
}
