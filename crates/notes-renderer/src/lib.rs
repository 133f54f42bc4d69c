//! Trait-based markdown renderer with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! through the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! [`StyledBackend`] renders semantic HTML5 with the note theme's classes on
//! headings, paragraphs, code, links and lists. Fenced code blocks with a
//! known language are highlighted into `hl-*` token spans.
//!
//! Shared functionality (tables, lists, inline formatting, heading IDs) is
//! handled by the generic renderer, while backend-specific elements (code
//! blocks, alerts, images, link targets, element classes) are delegated to
//! the backend. Links to other notes (`Link.md`) become `/docs/Link` routes.
//!
//! # Example
//!
//! ```
//! use notes_renderer::{MarkdownRenderer, StyledBackend};
//!
//! let result = MarkdownRenderer::<StyledBackend>::new()
//!     .with_title_extraction()
//!     .render_markdown("# Layouts\n\nSee [Templates](templates.md).");
//!
//! assert_eq!(result.title.as_deref(), Some("Layouts"));
//! assert!(result.html.contains(r#"href="/docs/templates""#));
//! ```

mod backend;
mod highlight;
mod html;
mod renderer;
mod state;
mod util;

pub use backend::{AlertKind, Element, RenderBackend};
pub use html::{StyledBackend, resolve_link};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
