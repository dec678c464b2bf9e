//!
//! Ellipsis protection.
//!
//! Snippets use `...` for omitted code, which is not valid JavaScript in most
//! positions. Before linting, the three common shapes are rewritten to valid
//! stand-ins built from a quoted placeholder string, and rewritten back afterwards:
//!
//! | written              | linted as                          |
//! |----------------------|------------------------------------|
//! | `function (a) {...}` | `function (a) {'&hellip;'}`        |
//! | `f(...)`             | `f('&hellip;')`                    |
//! | `f({...})`           | `f({'&hellip;': '&hellip;'})`      |
//! | `x = {...}`          | `x = {'&hellip;': '&hellip;'}`     |
//!
//! An ellipsis inside a string, template, regex or comment is never touched.

use crate::error::FormatError;
use crate::lexer::{TokenKind, tokenize};
use crate::rule::Fix;
use crate::utils::apply_fixes;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// Stand-in for a bare `...`
pub const PLACEHOLDER: &str = "'&hellip;'";

/// Stand-in for `{...}`
pub const PLACEHOLDER_OBJECT: &str = "{'&hellip;': '&hellip;'}";

// Order matters: each pattern only sees what the previous ones left behind
static FUNCTION_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function(\s*\([^(]*\)\s*)\{\s*\.{3}\s*\}").unwrap());
static CALL_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([{\s]*)\.{3}([}\s]*)\)").unwrap());
static OBJECT_BODY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\s*\.{3}\s*\}").unwrap());

/// Byte ranges of literals and comments, where an ellipsis is content
fn inert_spans(text: &str) -> Vec<Range<usize>> {
    let (tokens, _) = tokenize(text);
    tokens
        .into_iter()
        .filter(|t| {
            matches!(
                t.kind,
                TokenKind::String | TokenKind::Template | TokenKind::Regex | TokenKind::LineComment | TokenKind::BlockComment
            )
        })
        .map(|t| t.start..t.end)
        .collect()
}

/// Rewrite every match of `pattern` outside literals and comments in one edit pass.
/// `replace` returns `None` to leave a match as written.
fn rewrite(text: &str, pattern: &Regex, replace: impl Fn(&Captures) -> Option<String>) -> String {
    let inert = inert_spans(text);
    let edits: Vec<Fix> = pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let range = whole.range();
            if inert.iter().any(|span| span.start < range.end && range.start < span.end) {
                return None;
            }
            replace(&caps).map(|replacement| Fix::replace(range, replacement))
        })
        .collect();
    if edits.is_empty() {
        return text.to_string();
    }
    apply_fixes(text, edits)
}

/// Reject snippets that already contain the placeholder text, since restoring
/// would turn it into an ellipsis.
pub fn check_collision(text: &str) -> Result<(), FormatError> {
    match text.find(PLACEHOLDER) {
        Some(offset) => Err(FormatError::PlaceholderCollision {
            line: text[..offset].matches('\n').count() + 1,
        }),
        None => Ok(()),
    }
}

/// Replace the protected ellipsis shapes with parseable placeholders
pub fn protect(text: &str) -> String {
    let text = rewrite(text, &FUNCTION_BODY, |caps| {
        Some(format!("function{}{{{PLACEHOLDER}}}", &caps[1]))
    });

    let text = rewrite(&text, &CALL_ARGUMENT, |caps| {
        let pre = caps[1].trim();
        let post = caps[2].trim();
        match (pre, post) {
            ("", "") => Some(format!("({PLACEHOLDER})")),
            ("{", "}") => Some(format!("({PLACEHOLDER_OBJECT})")),
            _ => None,
        }
    });

    rewrite(&text, &OBJECT_BODY, |_| Some(PLACEHOLDER_OBJECT.to_string()))
}

/// Undo [`protect`]. The object form contains the scalar form, so it goes first.
pub fn unprotect(text: &str) -> String {
    text.replace(PLACEHOLDER_OBJECT, "{...}").replace(PLACEHOLDER, "...")
}
