//! Token-level helpers shared by several rules.

use crate::lexer::TokenKind;
use crate::lint_context::{BraceKind, LintContext};

/// Keywords whose parenthesized head is followed by a statement body
pub const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "with"];

/// Index of the last significant token of the statement starting at `start`.
///
/// A statement ends at a `;` on its own bracket level, at the closing brace of a
/// block body, or just before a closer that ends the enclosing scope.
pub fn statement_end(ctx: &LintContext, start: usize) -> Option<usize> {
    let mut idx = start;
    let mut last = start;
    loop {
        let token = &ctx.tokens[idx];
        if token.is_opener() {
            let close = ctx.matching(idx)?;
            if token.text == "{" && ctx.brace_kind(idx) == Some(BraceKind::Block) {
                // `if (a) { } else ...` continues past the block
                match ctx.next_sig(close) {
                    Some(next) if ctx.tokens[next].is_keyword("else") && ctx.tokens[start].is_keyword("if") => {
                        idx = ctx.next_sig(next)?;
                        last = next;
                        continue;
                    }
                    Some(next) if ctx.tokens[next].is_any_keyword(&["catch", "finally"]) => {
                        idx = next;
                        last = next;
                        continue;
                    }
                    _ => return Some(close),
                }
            }
            last = close;
            idx = close;
        } else if token.is_punct(";") {
            return Some(idx);
        } else if token.is_closer() {
            return Some(last);
        } else {
            last = idx;
        }

        match ctx.next_sig(idx) {
            Some(next) => idx = next,
            None => return Some(last),
        }
    }
}

/// Whether `(` at `idx` opens the argument list of a call or `new` expression
pub fn is_call_paren(ctx: &LintContext, idx: usize) -> bool {
    if !ctx.tokens[idx].is_punct("(") {
        return false;
    }
    let Some(prev) = ctx.prev_sig(idx) else {
        return false;
    };
    let token = &ctx.tokens[prev];
    match token.kind {
        TokenKind::Identifier => !ctx
            .prev_sig(prev)
            .is_some_and(|p| ctx.tokens[p].is_keyword("function") || ctx.tokens[p].is_punct("*")),
        TokenKind::Punctuator if token.text == ")" => ctx
            .matching(prev)
            .and_then(|open| ctx.prev_sig(open))
            .is_none_or(|kw| !ctx.tokens[kw].is_any_keyword(CONTROL_KEYWORDS)),
        TokenKind::Punctuator if token.text == "]" => true,
        TokenKind::Keyword => matches!(token.text, "super" | "this" | "import"),
        _ => false,
    }
}

/// Whether the parenthesized list at `open` is followed by a block body, making
/// it a parameter list rather than call arguments
pub fn is_parameter_list(ctx: &LintContext, open: usize) -> bool {
    ctx.matching(open)
        .and_then(|close| ctx.next_sig(close))
        .is_some_and(|next| {
            let token = &ctx.tokens[next];
            token.is_punct("=>") || (token.is_punct("{") && ctx.brace_kind(next) == Some(BraceKind::Block))
        })
}

/// Whether the statement keyword at `idx` starts a statement rather than being an
/// operand (`function` declarations versus expressions)
pub fn at_statement_start(ctx: &LintContext, idx: usize) -> bool {
    match ctx.prev_sig(idx) {
        None => true,
        Some(prev) => {
            let token = &ctx.tokens[prev];
            token.is_punct(";")
                || (token.is_punct("}") && ctx.closing_brace_kind(prev) == Some(BraceKind::Block))
                || (token.is_punct("{") && ctx.brace_kind(prev) == Some(BraceKind::Block))
        }
    }
}

/// Inner text of a comment token without its delimiters
pub fn comment_value(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("//") {
        rest
    } else {
        text.strip_prefix("/*")
            .map(|rest| rest.strip_suffix("*/").unwrap_or(rest))
            .unwrap_or(text)
    }
}
