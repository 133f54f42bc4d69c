//! Static assets for the notes browser.
//!
//! The stylesheet and the client-side search script are compiled into the
//! binary with `rust-embed`, so `notes serve` and `notes build` need nothing
//! on disk besides the notes themselves.

use std::borrow::Cow;

#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
struct Assets;

/// Get an asset by file name (e.g. `styles.css`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[must_use]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Iterate all asset file names.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// MIME type for the given file path.
#[must_use]
pub fn mime_for(path: &str) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_types() {
        assert_eq!(mime_for("styles.css"), "text/css");
        assert_eq!(mime_for("search.js"), "text/javascript");
        assert_eq!(mime_for("index.html"), "text/html");
    }

    #[test]
    fn test_mime_for_unknown_type() {
        assert_eq!(mime_for("file.unknown_ext_xyz"), "application/octet-stream");
    }

    #[test]
    fn test_bundled_assets() {
        let mut names: Vec<_> = iter().map(Cow::into_owned).collect();
        names.sort();
        assert_eq!(names, vec!["search.js", "styles.css"]);
    }

    #[test]
    fn test_get_stylesheet() {
        let css = get("styles.css").unwrap();
        assert!(std::str::from_utf8(&css).unwrap().contains(".prose"));
    }

    #[test]
    fn test_stylesheet_colors_highlighted_code() {
        let css = get("styles.css").unwrap();
        let css = std::str::from_utf8(&css).unwrap();
        assert!(css.contains(".hl-string"));
        assert!(css.contains(".hl-comment"));
    }

    #[test]
    fn test_search_script_applies_query_parameter() {
        let js = get("search.js").unwrap();
        let js = std::str::from_utf8(&js).unwrap();
        assert!(js.contains(r#"URLSearchParams(window.location.search).get("q")"#));
    }

    #[test]
    fn test_get_nonexistent_asset() {
        assert!(get("nonexistent_file_that_does_not_exist.txt").is_none());
        assert!(get("../Cargo.toml").is_none());
    }
}
