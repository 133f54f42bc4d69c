//! Syntax highlighting for fenced code blocks.
//!
//! Tokens are wrapped in `<span>`s carrying their scope names as `hl-*`
//! classes (`string.quoted.double.js` becomes `hl-string hl-quoted hl-double
//! hl-js`). Colors come from the bundled stylesheet, so highlighted pages
//! need no inline styles or client scripts.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Prefix of every token class.
pub const CLASS_PREFIX: &str = "hl-";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Resolve a fence language to a bundled grammar.
///
/// TypeScript and JSX have no grammar of their own and use JavaScript.
fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    let lang = lang.to_ascii_lowercase();
    let token = match lang.as_str() {
        "ts" | "tsx" | "typescript" | "jsx" | "mjs" | "cjs" => "js",
        "shell" | "console" | "zsh" => "bash",
        other => other,
    };
    SYNTAXES.find_syntax_by_token(token)
}

/// Highlight `code` written in `lang`.
///
/// Returns escaped HTML with token spans, or `None` when no grammar matches
/// the language.
#[must_use]
pub fn highlight(lang: &str, code: &str) -> Option<String> {
    let syntax = find_syntax(lang)?;
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAXES,
        ClassStyle::SpacedPrefixed {
            prefix: CLASS_PREFIX,
        },
    );
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .ok()?;
    }
    Some(generator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_javascript() {
        let html = highlight("js", "let s = \"a\";\n").unwrap();
        assert!(html.contains(r#"class="hl-source hl-js""#));
        assert!(html.contains("hl-string"));
        assert!(html.contains("let"));
    }

    #[test]
    fn test_highlight_typescript_uses_javascript_grammar() {
        let html = highlight("tsx", "export default function Page() {}\n").unwrap();
        assert!(html.contains("hl-js"));
    }

    #[test]
    fn test_highlight_language_is_case_insensitive() {
        assert!(highlight("JS", "x\n").is_some());
    }

    #[test]
    fn test_highlight_escapes_markup() {
        let html = highlight("js", "const el = <div>&</div>;\n").unwrap();
        assert!(html.contains("&lt;"));
        assert!(!html.contains("<div>"));
    }

    #[test]
    fn test_highlight_unknown_language() {
        assert_eq!(highlight("mermaid", "graph TD"), None);
    }
}
