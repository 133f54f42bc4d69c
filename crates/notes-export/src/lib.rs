//! Static site generation for the notes browser.
//!
//! Writes the same pages the server renders into a directory that any static
//! file host can serve:
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── assets/{styles.css,search.js}
//! └── docs/{slug}.html
//! ```

mod builder;

pub use builder::{BuildConfig, BuildError, BuildReport, FailedPage, StaticSiteBuilder};
