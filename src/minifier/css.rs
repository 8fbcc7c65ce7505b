//! # CSS Minification Pass
//!
//! Regex-based CSS compression: strips block comments, collapses whitespace
//! runs and removes the spaces around structural punctuation.
//!
//! This is deliberately not a CSS parser. Malformed input produces
//! best-effort output; the only hard failure mode is I/O, handled by the
//! caller.

use regex::Regex;

/// Minify raw CSS text.
///
/// The pass is idempotent: running it on its own output returns the same
/// string.
pub fn minify_css(css: &str) -> String {
    // Strip /* ... */ comments, including multi-line ones
    let re_comment = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    let css = re_comment.replace_all(css, "");

    // Collapse every whitespace run (spaces, tabs, newlines) to one space
    let re_whitespace = Regex::new(r"\s+").unwrap();
    let css = re_whitespace.replace_all(&css, " ");

    // Drop the spaces around selectors and declarations
    let re_open = Regex::new(r"\s*\{\s*").unwrap();
    let css = re_open.replace_all(&css, "{");
    let re_close = Regex::new(r"\s*\}\s*").unwrap();
    let css = re_close.replace_all(&css, "}");
    let re_semi = Regex::new(r"\s*;\s*").unwrap();
    let css = re_semi.replace_all(&css, ";");
    let re_colon = Regex::new(r"\s*:\s*").unwrap();
    let css = re_colon.replace_all(&css, ":");
    let re_comma = Regex::new(r"\s*,\s*").unwrap();
    let css = re_comma.replace_all(&css, ",");

    css.trim().to_string()
}
