//! Page rendering, navigation and page shells for the notes browser.
//!
//! This crate provides:
//! - [`Site`]: renders notes from a [`Storage`](notes_storage::Storage)
//!   backend and assembles full HTML pages
//! - [`Navigation`]: the filtered sidebar for one request
//! - [`Landing`]: search results or popular topics for the landing page

mod landing;
mod navigation;
mod page;
mod site;
mod template;

pub use landing::Landing;
pub use navigation::{NavGroup, NavItem, NavState, Navigation};
pub use page::{PageOutcome, PageRenderResult, RenderError, not_found_message};
pub use site::{CheckReport, HtmlPage, Site, SiteConfig};
pub use template::{SCRIPT_PATH, STYLESHEET_PATH};

