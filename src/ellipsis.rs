//!
//! Turns lines that hold nothing but `...` into `// ...` comments, so that the
//! beautifier and the rule engine see a comment instead of a syntax error.

use crate::lint_context::LintContext;
use regex::Regex;
use std::sync::LazyLock;

static ELLIPSIS_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\.{3}\s*$").unwrap());

/// Comment out every line whose trimmed content is exactly `...`. Lines inside a
/// multi-line template or comment are content and stay as they are.
pub fn comment_ellipsis_lines(text: &str) -> String {
    if !text.contains("...") {
        return text.to_string();
    }
    let ctx = LintContext::new(text);
    ctx.lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if ELLIPSIS_LINE.is_match(line) && !ctx.starts_inside_token(idx + 1) {
                line.replacen("...", "// ...", 1)
            } else {
                (*line).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
