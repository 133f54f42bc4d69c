//! Landing page view.

use notes_registry::{DocEntry, Registry};

/// Landing page content for one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Landing {
    /// Query the results were computed for.
    pub query: String,
    /// Search results; `None` when the query is empty.
    ///
    /// `Some(vec![])` means the query matched nothing ("No results found.").
    pub results: Option<Vec<DocEntry>>,
    /// First entries in declared order ("Popular Topics").
    pub popular: Vec<DocEntry>,
}

impl Landing {
    /// Build the landing view. Results are shown instead of popular topics
    /// whenever the query is non-empty.
    #[must_use]
    pub fn build(registry: &Registry, query: &str, popular_count: usize) -> Self {
        let results = (!query.is_empty()).then(|| registry.search(query));
        Self {
            query: query.to_owned(),
            results,
            popular: registry.popular(popular_count),
        }
    }

    /// Heading of the visible card section.
    #[must_use]
    pub fn section_title(&self) -> &'static str {
        if self.results.is_some() {
            "Search Results"
        } else {
            "Popular Topics"
        }
    }

    /// Cards to display: results for a query, popular topics otherwise.
    #[must_use]
    pub fn cards(&self) -> &[DocEntry] {
        self.results.as_deref().unwrap_or(&self.popular)
    }
}
