//! # JavaScript Minification Pass
//!
//! This module implements the JS compression pipeline with string-literal
//! protection.
//!
//! ## Pipeline:
//! 1. A single escape-aware scan walks the source once, dropping `//` and
//!    `/* ... */` comments and lifting every `'...'`, `"..."` and
//!    backtick-delimited literal out of the code, each replaced by a unique
//!    placeholder token
//! 2. Whitespace runs are collapsed and blank lines removed in the code-only
//!    text
//! 3. Spaces around a fixed operator set are removed
//! 4. Remaining newlines are dropped and the text trimmed
//! 5. The original literals are substituted back, verbatim, in a single pass
//!
//! Because comments and literals are classified in the same scan, a `//` or
//! `/* */` sequence inside a string can never be mistaken for a comment, and
//! comment text containing a stray quote can never open a literal.
//!
//! ## Limitations:
//! This is not a JS lexer. Regex literals (`/ab+c/`) are treated as plain
//! code, so division-adjacent edge cases can misfire; unterminated literals
//! and comments run to end of input. Best-effort by design.

use regex::{Captures, Regex};

/// Region classification produced by the scanner.
#[derive(Debug, PartialEq, Eq)]
enum Span {
    /// Plain code text, kept in the rewrite stream
    Code(String),
    /// A complete string/template literal, delimiters included
    Literal(String),
}

/// Scan JS source once, splitting it into code and literal spans and
/// discarding comments. Escapes (`\"`, `\'`, `` \` ``, `\\`) are honored
/// inside literals.
fn scan(js: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut code = String::new();
    let mut chars = js.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' => match chars.peek() {
                Some('/') => {
                    // Line comment: drop up to (but not including) the newline
                    chars.next();
                    while let Some(&n) = chars.peek() {
                        if n == '\n' {
                            break;
                        }
                        chars.next();
                    }
                }
                Some('*') => {
                    // Block comment: drop through the closing */
                    chars.next();
                    let mut prev = '\0';
                    for n in chars.by_ref() {
                        if prev == '*' && n == '/' {
                            break;
                        }
                        prev = n;
                    }
                }
                _ => code.push(c),
            },
            '\'' | '"' | '`' => {
                if !code.is_empty() {
                    spans.push(Span::Code(std::mem::take(&mut code)));
                }
                let mut literal = String::new();
                literal.push(c);
                let mut escaped = false;
                for n in chars.by_ref() {
                    literal.push(n);
                    if escaped {
                        escaped = false;
                    } else if n == '\\' {
                        escaped = true;
                    } else if n == c {
                        break;
                    }
                }
                spans.push(Span::Literal(literal));
            }
            _ => code.push(c),
        }
    }

    if !code.is_empty() {
        spans.push(Span::Code(code));
    }

    spans
}

/// Minify raw JavaScript text.
///
/// String and template literals survive byte-for-byte; everything else has
/// its whitespace collapsed and comments removed. Idempotent.
pub fn minify_js(js: &str) -> String {
    // Mask: literals become opaque tokens so the bulk rewrites below cannot
    // touch their contents
    let mut masked = String::with_capacity(js.len());
    let mut literals = Vec::new();
    for span in scan(js) {
        match span {
            Span::Code(text) => masked.push_str(&text),
            Span::Literal(text) => {
                masked.push_str(&format!("__STR_TOKEN_{}__", literals.len()));
                literals.push(text);
            }
        }
    }

    // Collapse horizontal whitespace in code regions
    let re_blank = Regex::new(r"[ \t]+").unwrap();
    let masked = re_blank.replace_all(&masked, " ");

    // Trim around newlines, then collapse newline runs
    let re_line_edges = Regex::new(r" *\n *").unwrap();
    let masked = re_line_edges.replace_all(&masked, "\n");
    let re_newlines = Regex::new(r"\n+").unwrap();
    let masked = re_newlines.replace_all(&masked, "\n");

    // Tighten spaces around operators and punctuation (safe: literal text is
    // hidden behind placeholders at this point)
    let re_ops = Regex::new(r" *([{}();,=+\-*/<>!&|]) *").unwrap();
    let masked = re_ops.replace_all(&masked, "$1");

    // Newlines carry no meaning for the rewritten code stream
    let masked = masked.replace('\n', "");
    let masked = masked.trim();

    // Restore: one pass, so restored literal text is never rescanned even if
    // it happens to contain a placeholder-shaped substring
    let re_token = Regex::new(r"__STR_TOKEN_(\d+)__").unwrap();
    re_token
        .replace_all(masked, |caps: &Captures| {
            let index: usize = caps[1].parse().unwrap_or(0);
            literals
                .get(index)
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_literal_spacing() {
        let out = minify_js("let s = 'foo  bar'; // comment\n");
        assert!(out.contains("'foo  bar'"));
        assert!(!out.contains("comment"));
        assert_eq!(out, "let s='foo  bar';");
    }

    #[test]
    fn test_removes_line_comments() {
        let out = minify_js("let a = 1; // one\nlet b = 2; // two\n");
        assert!(!out.contains("//"));
        assert_eq!(out, "let a=1;let b=2;");
    }

    #[test]
    fn test_removes_block_comments() {
        let out = minify_js("/* header\n   block */\nlet x = 3; /* inline */ let y = 4;");
        assert!(!out.contains("header"));
        assert!(!out.contains("inline"));
        assert_eq!(out, "let x=3;let y=4;");
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        // The scan classifies comments and literals together, so these are
        // string content, not comments
        let out = minify_js("let url = 'https://example.com/a'; let g = \"/* keep */\";");
        assert!(out.contains("'https://example.com/a'"));
        assert!(out.contains("\"/* keep */\""));
    }

    #[test]
    fn test_quote_inside_comment_does_not_open_literal() {
        let out = minify_js("// don't trip\nlet ok = 1;  let more = 2;");
        assert_eq!(out, "let ok=1;let more=2;");
    }

    #[test]
    fn test_escaped_quotes() {
        let input = r#"let q = 'it\'s  here'; let r = "say \"hi\"  now";"#;
        let out = minify_js(input);
        assert!(out.contains(r"'it\'s  here'"));
        assert!(out.contains(r#""say \"hi\"  now""#));
    }

    #[test]
    fn test_template_literal_newlines_preserved() {
        let input = "const t = `line one\n  line two`;\nlet n = 1;";
        let out = minify_js(input);
        assert!(out.contains("`line one\n  line two`"));
        assert!(out.ends_with("let n=1;"));
    }

    #[test]
    fn test_operator_tightening() {
        let out = minify_js("let sum = a + b * ( c - d ) / e;");
        assert_eq!(out, "let sum=a+b*(c-d)/e;");
    }

    #[test]
    fn test_newlines_removed_in_code() {
        let out = minify_js("function f() {\n  return 1;\n}\n\n\nf();");
        assert!(!out.contains('\n'));
        assert_eq!(out, "function f(){return 1;}f();");
    }

    #[test]
    fn test_idempotent() {
        let input = "let s = 'a  b';  // c\nfunction g( x ) { return x + 1 ; }\n";
        let once = minify_js(input);
        let twice = minify_js(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unterminated_literal_best_effort() {
        // Runs to end of input, nothing panics, text survives
        let out = minify_js("let s = 'no end");
        assert!(out.contains("'no end"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(minify_js(""), "");
        assert_eq!(minify_js("// nothing but a comment\n"), "");
    }

    #[test]
    fn test_scan_splits_regions() {
        let spans = scan("a = 'x'; // c\nb");
        assert_eq!(spans[0], Span::Code("a = ".to_string()));
        assert_eq!(spans[1], Span::Literal("'x'".to_string()));
        assert_eq!(spans[2], Span::Code("; \nb".to_string()));
    }
}
