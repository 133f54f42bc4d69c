//! Site: registry, storage and renderer tied together.
//!
//! A [`Site`] holds no mutable state. Every call re-reads the note from
//! storage and re-renders it, so edits show up on the next request.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use notes_registry::Registry;
//! use notes_site::{NavState, Site, SiteConfig};
//! use notes_storage::MockStorage;
//!
//! let registry = Registry::from_toml_str(r#"
//! [[groups]]
//! title = "Routing"
//! items = [{ name = "Link", file = "Link.md" }]
//! "#)?;
//! let storage = Arc::new(MockStorage::new().with_note("Link", "# Link\n\nClient navigation."));
//! let site = Site::new(registry, storage, SiteConfig::default());
//!
//! let page = site.document_html("Link", &NavState::default())?;
//! assert!(page.found);
//! assert!(page.html.contains("<article class=\"prose\">"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use notes_registry::{Registry, Slug};
use notes_renderer::{MarkdownRenderer, StyledBackend};
use notes_storage::{Storage, StorageError};

use crate::landing::Landing;
use crate::navigation::{NavState, Navigation};
use crate::page::{PageOutcome, PageRenderResult, RenderError};
use crate::template::{self, Body};

/// Presentation settings for the generated pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site title, shown in the sidebar header and the `<title>` suffix.
    pub title: String,
    /// Line under the sidebar title.
    pub tagline: String,
    /// Landing page hero heading.
    pub heading: String,
    /// Landing page hero text.
    pub description: String,
    /// Landing page footer line.
    pub footer: String,
    /// Number of entries under "Popular Topics".
    pub popular_count: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Notes".to_owned(),
            tagline: String::new(),
            heading: "Notes".to_owned(),
            description: String::new(),
            footer: String::new(),
            popular_count: 6,
        }
    }
}

/// Complete HTML document for one route.
#[derive(Clone, Debug)]
pub struct HtmlPage {
    /// Full page markup.
    pub html: String,
    /// `false` when the page shows the not-found message.
    pub found: bool,
    /// Modification time of the rendered note, if one was found.
    pub source_mtime: Option<f64>,
}

/// Consistency between the registry and the notes directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Registry entries without a markdown file (broken navigation links).
    pub missing: Vec<Slug>,
    /// Markdown files not listed in the registry.
    ///
    /// They are still routable but unreachable from navigation.
    pub unregistered: Vec<Slug>,
}

impl CheckReport {
    /// Whether every registry entry has a backing file.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Notes site.
pub struct Site {
    registry: Registry,
    storage: Arc<dyn Storage>,
    config: SiteConfig,
}

impl Site {
    /// Create a site over a loaded registry and a storage backend.
    #[must_use]
    pub fn new(registry: Registry, storage: Arc<dyn Storage>, config: SiteConfig) -> Self {
        Self {
            registry,
            storage,
            config,
        }
    }

    /// Document registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Presentation settings.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render a note.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if there is no `{slug}.md` file and
    /// [`RenderError::Io`] if it cannot be read (including invalid UTF-8).
    pub fn render(&self, slug: &Slug) -> Result<PageRenderResult, RenderError> {
        let source_mtime = self
            .storage
            .mtime(slug)
            .map_err(|e| RenderError::from_storage(slug, e))?;
        let markdown = self
            .storage
            .read(slug)
            .map_err(|e| RenderError::from_storage(slug, e))?;

        let result = MarkdownRenderer::<StyledBackend>::new()
            .with_title_extraction()
            .render_markdown(&markdown);

        Ok(PageRenderResult {
            html: result.html,
            title: result.title,
            source_mtime,
        })
    }

    /// Resolve a route parameter to a rendered note or a not-found message.
    ///
    /// Invalid slugs (path traversal, separators) are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the note exists but cannot be read.
    pub fn page(&self, raw: &str) -> Result<PageOutcome, RenderError> {
        let slug = match Slug::parse(raw) {
            Ok(slug) => slug,
            Err(e) => {
                tracing::warn!(slug = raw, error = %e, "Rejected invalid slug");
                return Ok(PageOutcome::missing(raw));
            }
        };

        match self.render(&slug) {
            Ok(page) => Ok(PageOutcome::Rendered { slug, page }),
            Err(e) if e.is_not_found() => {
                tracing::error!(slug = %slug, error = %e, "Note not found");
                Ok(PageOutcome::missing(raw))
            }
            Err(e) => Err(e),
        }
    }

    /// Sidebar for `state`, highlighting `active`.
    #[must_use]
    pub fn navigation(&self, state: &NavState, active: Option<&Slug>) -> Navigation {
        Navigation::build(&self.registry, state, active)
    }

    /// Landing page view for `query`.
    #[must_use]
    pub fn landing(&self, query: &str) -> Landing {
        Landing::build(&self.registry, query, self.config.popular_count)
    }

    /// Slugs to pre-render: every markdown file in the notes directory.
    ///
    /// A failed scan is logged and yields no slugs.
    #[must_use]
    pub fn static_slugs(&self) -> Vec<Slug> {
        match self.storage.scan() {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to scan notes directory");
                Vec::new()
            }
        }
    }

    /// Compare the registry with the notes on disk.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the notes directory cannot be scanned.
    pub fn check(&self) -> Result<CheckReport, StorageError> {
        let on_disk: BTreeSet<Slug> = self.storage.scan()?.into_iter().collect();

        let missing = self
            .registry
            .slugs()
            .into_iter()
            .filter(|slug| !on_disk.contains(slug))
            .collect();
        let unregistered = on_disk
            .into_iter()
            .filter(|slug| !self.registry.contains(slug.as_str()))
            .collect();

        Ok(CheckReport {
            missing,
            unregistered,
        })
    }

    /// Full HTML for `/docs/{raw}`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the note exists but cannot be read.
    pub fn document_html(&self, raw: &str, state: &NavState) -> Result<HtmlPage, RenderError> {
        let catalog = self.registry.entries();
        let page = match self.page(raw)? {
            PageOutcome::Rendered { slug, page } => {
                let nav = self.navigation(state, Some(&slug));
                let title = page
                    .title
                    .clone()
                    .or_else(|| self.registry.find(slug.as_str()).map(|(_, item)| item.name.clone()))
                    .unwrap_or_else(|| slug.to_string());
                HtmlPage {
                    html: template::render_document(
                        &self.config,
                        &nav,
                        &title,
                        &slug.href(),
                        &Body::Article(&page.html),
                        &catalog,
                    ),
                    found: true,
                    source_mtime: Some(page.source_mtime),
                }
            }
            PageOutcome::Missing { slug, message } => {
                let nav = self.navigation(state, None);
                HtmlPage {
                    html: template::render_document(
                        &self.config,
                        &nav,
                        "Not found",
                        &format!("/docs/{slug}"),
                        &Body::Missing(&message),
                        &catalog,
                    ),
                    found: false,
                    source_mtime: None,
                }
            }
        };
        Ok(page)
    }

    /// Full HTML for the landing page.
    #[must_use]
    pub fn landing_html(&self, query: &str) -> String {
        template::render_landing(&self.config, &self.landing(query), &self.registry.entries())
    }

    /// Full HTML for routes that match nothing.
    #[must_use]
    pub fn not_found_html(&self) -> String {
        template::render_not_found(&self.config)
    }
}
