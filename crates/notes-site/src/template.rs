//! HTML page shells.
//!
//! Every page links the bundled stylesheet and search script and embeds the
//! flattened catalog as JSON, so the script can filter the sidebar and the
//! landing cards with the same rules the server applies for `?q=`.

use std::fmt::Write;

use notes_registry::DocEntry;
use notes_renderer::escape_html;

use crate::landing::Landing;
use crate::navigation::Navigation;
use crate::site::SiteConfig;

/// Public path of the bundled stylesheet.
pub const STYLESHEET_PATH: &str = "/assets/styles.css";
/// Public path of the bundled search script.
pub const SCRIPT_PATH: &str = "/assets/search.js";

/// Main column of a document page.
pub(crate) enum Body<'a> {
    /// Rendered note HTML.
    Article(&'a str),
    /// Inline message for a note that does not exist.
    Missing(&'a str),
}

/// Serialize entries for the embedded `<script type="application/json">`.
///
/// `<` is escaped so note titles can never close the script element.
fn catalog_json(entries: &[DocEntry]) -> String {
    match serde_json::to_string(entries) {
        Ok(json) => json.replace('<', "\\u003c"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize catalog");
            "[]".to_owned()
        }
    }
}

fn head(html: &mut String, title: &str, catalog: &[DocEntry]) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET_PATH}\">");
    let _ = writeln!(html, "<script src=\"{SCRIPT_PATH}\" defer></script>");
    let _ = writeln!(
        html,
        "<script type=\"application/json\" id=\"notes-catalog\">{}</script>",
        catalog_json(catalog)
    );
    html.push_str("</head>\n");
}

fn search_box(html: &mut String, query: &str, action: &str) {
    let _ = writeln!(
        html,
        "<form class=\"search\" role=\"search\" method=\"get\" action=\"{}\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search...\" \
         autocomplete=\"off\" aria-label=\"Search notes\" data-search-input></form>",
        escape_html(action),
        escape_html(query)
    );
}

/// Render a document page: sidebar plus article or not-found message.
pub(crate) fn render_document(
    config: &SiteConfig,
    nav: &Navigation,
    page_title: &str,
    current_href: &str,
    body: &Body<'_>,
    catalog: &[DocEntry],
) -> String {
    let mut html = String::with_capacity(16384);
    let title = format!("{page_title} | {}", config.title);
    head(&mut html, &title, catalog);
    html.push_str("<body class=\"docs\">\n<div class=\"layout\">\n");

    render_sidebar(&mut html, config, nav, current_href);

    html.push_str("<main class=\"content\">\n<div class=\"content-header\">");
    let _ = write!(
        html,
        "<a class=\"sidebar-open\" href=\"{}?menu=open\" aria-label=\"Open menu\" \
         data-sidebar-open>&#9776;</a>",
        escape_html(current_href)
    );
    html.push_str("</div>\n");

    match body {
        Body::Article(content) => {
            html.push_str("<article class=\"prose\">\n");
            html.push_str(content);
            html.push_str("\n</article>\n");
        }
        Body::Missing(message) => {
            let _ = writeln!(
                html,
                "<div class=\"not-found\" role=\"alert\">{}</div>",
                escape_html(message)
            );
        }
    }

    html.push_str("</main>\n</div>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, config: &SiteConfig, nav: &Navigation, current_href: &str) {
    let class = if nav.sidebar_open {
        "sidebar open"
    } else {
        "sidebar"
    };
    let _ = writeln!(html, "<aside class=\"{class}\" data-sidebar>");

    html.push_str("<div class=\"sidebar-header\">\n<div>");
    let _ = write!(
        html,
        "<a href=\"/\" class=\"brand\">{}</a>",
        escape_html(&config.title)
    );
    if !config.tagline.is_empty() {
        let _ = write!(
            html,
            "<p class=\"tagline\">{}</p>",
            escape_html(&config.tagline)
        );
    }
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<a class=\"sidebar-close\" href=\"{}\" aria-label=\"Close menu\" \
         data-sidebar-close>&#10005;</a>",
        escape_html(current_href)
    );
    html.push_str("</div>\n");

    search_box(html, &nav.query, current_href);

    html.push_str("<nav class=\"nav\" data-nav>\n");
    for group in &nav.groups {
        html.push_str("<div class=\"nav-group\">\n");
        let _ = writeln!(
            html,
            "<h2 class=\"nav-group-title\">{}</h2>",
            escape_html(&group.title)
        );
        html.push_str("<ul class=\"nav-list\">\n");
        for item in &group.items {
            let (class, current) = if item.is_active {
                ("nav-link active", " aria-current=\"page\"")
            } else {
                ("nav-link", "")
            };
            let _ = writeln!(
                html,
                "<li><a href=\"{}\" class=\"{class}\"{current}>{}</a></li>",
                escape_html(&item.href),
                escape_html(&item.title)
            );
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</nav>\n</aside>\n");
}

/// Render the landing page: hero, search, cards and footer.
pub(crate) fn render_landing(config: &SiteConfig, landing: &Landing, catalog: &[DocEntry]) -> String {
    let mut html = String::with_capacity(8192);
    head(&mut html, &config.title, catalog);
    html.push_str("<body class=\"landing\">\n");

    html.push_str("<header class=\"hero\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&config.heading));
    if !config.description.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"hero-text\">{}</p>",
            escape_html(&config.description)
        );
    }
    search_box(&mut html, &landing.query, "/");
    html.push_str("</header>\n");

    let _ = writeln!(
        html,
        "<section class=\"cards-section\" data-landing-cards data-popular-count=\"{}\">",
        landing.popular.len()
    );
    let _ = writeln!(
        html,
        "<h2 data-cards-title>{}</h2>",
        landing.section_title()
    );
    let empty_hidden = if landing.cards().is_empty() { "" } else { " hidden" };
    let _ = writeln!(
        html,
        "<p class=\"no-results\" data-no-results{empty_hidden}>No results found.</p>"
    );
    html.push_str("<div class=\"cards\" data-cards>\n");
    for entry in landing.cards() {
        render_card(&mut html, entry);
    }
    html.push_str("</div>\n</section>\n");

    if !config.footer.is_empty() {
        let _ = writeln!(
            html,
            "<footer class=\"footer\"><p>{}</p></footer>",
            escape_html(&config.footer)
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_card(html: &mut String, entry: &DocEntry) {
    let _ = writeln!(
        html,
        "<a class=\"card\" href=\"{}\"><h3>{}</h3><p>{}</p></a>",
        escape_html(&entry.href),
        escape_html(&entry.title),
        escape_html(&entry.group)
    );
}

/// Render the page shown for routes that do not exist.
pub(crate) fn render_not_found(config: &SiteConfig) -> String {
    let mut html = String::with_capacity(1024);
    head(&mut html, &format!("Page not found | {}", config.title), &[]);
    html.push_str("<body class=\"landing\">\n<header class=\"hero\">\n");
    html.push_str("<h1>Page not found</h1>\n");
    html.push_str("<p class=\"hero-text\"><a href=\"/\">Back to all notes</a></p>\n");
    html.push_str("</header>\n</body>\n</html>\n");
    html
}
