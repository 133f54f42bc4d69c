//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notes_registry::Slug;
use notes_site::{NavState, Site};

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Output directory (created if missing).
    pub out_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dist"),
        }
    }
}

/// Error returned by the static site builder.
///
/// Only failures that leave no usable output abort the build. A note that
/// cannot be rendered is reported in [`BuildReport::failed`] instead.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Output directory or a shared file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A note that was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedPage {
    /// Note slug.
    pub slug: Slug,
    /// Why it was skipped.
    pub error: String,
}

/// Summary of a finished build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of note pages written.
    pub pages: usize,
    /// Notes that could not be rendered or written.
    pub failed: Vec<FailedPage>,
}

/// Builds a static site from a [`Site`].
pub struct StaticSiteBuilder {
    site: Arc<Site>,
    config: BuildConfig,
}

impl StaticSiteBuilder {
    /// Create a builder writing into `config.out_dir`.
    #[must_use]
    pub fn new(site: Arc<Site>, config: BuildConfig) -> Self {
        Self { site, config }
    }

    /// Write every page, the bundled assets and the not-found page.
    ///
    /// Pages are generated for every note in the notes directory, registered
    /// or not.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Io`] if the output directories, the landing page,
    /// the not-found page or an asset cannot be written.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let out_dir = &self.config.out_dir;
        let docs_dir = out_dir.join("docs");
        let assets_dir = out_dir.join("assets");
        create_dir(&docs_dir)?;
        create_dir(&assets_dir)?;

        write_file(&out_dir.join("index.html"), self.site.landing_html("").as_bytes())?;
        write_file(&out_dir.join("404.html"), self.site.not_found_html().as_bytes())?;

        for name in notes_assets::iter() {
            if let Some(content) = notes_assets::get(&name) {
                write_file(&assets_dir.join(name.as_ref()), &content)?;
            }
        }

        let mut report = BuildReport::default();
        for slug in self.site.static_slugs() {
            match self.build_page(&docs_dir, &slug) {
                Ok(()) => report.pages += 1,
                Err(error) => {
                    tracing::error!(slug = %slug, error = %error, "Skipping note");
                    report.failed.push(FailedPage { slug, error });
                }
            }
        }

        tracing::info!(
            pages = report.pages,
            failed = report.failed.len(),
            out_dir = %out_dir.display(),
            "Static site built"
        );
        Ok(report)
    }

    fn build_page(&self, docs_dir: &Path, slug: &Slug) -> Result<(), String> {
        let page = self
            .site
            .document_html(slug.as_str(), &NavState::default())
            .map_err(|e| e.to_string())?;
        if !page.found {
            return Err(notes_site::not_found_message(slug.as_str()));
        }

        let path = docs_dir.join(format!("{slug}.html"));
        write_file(&path, page.html.as_bytes()).map_err(|e| e.to_string())
    }
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), BuildError> {
    fs::write(path, content).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}
