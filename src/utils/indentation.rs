//! Expected indentation levels, shared by the `indent` rule and the beautifier.

use crate::lint_context::LintContext;

struct OpenBracket {
    token: usize,
    level: usize,
    switch_body: bool,
}

/// Compute the expected indentation level (in units, not spaces) of every line.
///
/// Lines without tokens and lines that begin inside a multi-line comment, string or
/// template yield `None`. `switch_case` is the number of levels `case` clauses sit
/// inside their `switch`.
pub fn expected_levels(ctx: &LintContext, switch_case: usize) -> Vec<Option<usize>> {
    let mut stack: Vec<OpenBracket> = Vec::new();
    let mut levels = vec![None; ctx.line_count()];
    let mut line_levels = vec![0; ctx.line_count()];

    let base_level = |stack: &[OpenBracket]| -> usize {
        match stack.last() {
            Some(open) if open.switch_body => open.level + switch_case + 1,
            Some(open) => open.level + 1,
            None => 0,
        }
    };

    for line in 1..=ctx.line_count() {
        let Some(first) = ctx.first_token_on_line(line) else {
            continue;
        };
        let continued = ctx.starts_inside_token(line);
        let first_token = &ctx.tokens[first];

        let level = if first_token.is_closer() {
            ctx.matching(first)
                .and_then(|open| stack.iter().rposition(|o| o.token == open))
                .map(|pos| stack[pos].level)
                .unwrap_or_else(|| base_level(&stack).saturating_sub(1))
        } else {
            let mut level = base_level(&stack);
            if let Some(top) = stack.last()
                && top.switch_body
                && first_token.is_any_keyword(&["case", "default"])
            {
                level = top.level + switch_case;
            }
            if first_token.is_punct(".") || first_token.is_punct("?.") {
                level += 1;
            } else if continues_operand(ctx, first) && !inside_brackets(ctx, &stack) {
                level += 1;
            } else if starts_braceless_body(ctx, first) {
                level += 1;
            }
            level
        };

        if !continued {
            levels[line - 1] = Some(level);
        }
        line_levels[line - 1] = level;

        // Update the bracket stack with every token that starts on this line
        let mut idx = first;
        while idx < ctx.tokens.len() && ctx.tokens[idx].line == line {
            let token = &ctx.tokens[idx];
            if token.is_opener() {
                // A block after a wrapped condition lines up with the line holding `(`
                let level = ctx
                    .prev_sig(idx)
                    .filter(|_| token.is_punct("{"))
                    .filter(|&p| ctx.tokens[p].is_punct(")"))
                    .and_then(|p| ctx.matching(p))
                    .filter(|&open| ctx.tokens[open].line < line)
                    .map_or(level, |open| line_levels[ctx.tokens[open].line - 1]);
                stack.push(OpenBracket {
                    token: idx,
                    level,
                    switch_body: ctx.is_switch_body(idx),
                });
            } else if token.is_closer()
                && let Some(open) = ctx.matching(idx)
                && let Some(pos) = stack.iter().rposition(|o| o.token == open)
            {
                stack.truncate(pos);
            }
            idx += 1;
        }
    }

    levels
}

fn inside_brackets(ctx: &LintContext, stack: &[OpenBracket]) -> bool {
    stack.last().is_some_and(|open| !ctx.tokens[open.token].is_punct("{"))
}

/// Whether the line starting at `first` is the body of an `if`, `else`, loop or `do`
/// written without braces.
fn starts_braceless_body(ctx: &LintContext, first: usize) -> bool {
    if ctx.tokens[first].is_punct("{") {
        return false;
    }
    let Some(prev) = ctx.prev_sig(first) else {
        return false;
    };
    let token = &ctx.tokens[prev];
    if token.is_any_keyword(&["else", "do"]) {
        return true;
    }
    let Some(keyword) = token
        .is_punct(")")
        .then(|| ctx.matching(prev))
        .flatten()
        .and_then(|open| ctx.prev_sig(open))
    else {
        return false;
    };
    let keyword_token = &ctx.tokens[keyword];
    if keyword_token.is_keyword("while") {
        return !closes_do_body(ctx, keyword);
    }
    keyword_token.is_any_keyword(&["if", "for", "with"])
}

/// Whether the `while` at `idx` is the tail of a `do { ... } while (...)` loop
fn closes_do_body(ctx: &LintContext, idx: usize) -> bool {
    ctx.prev_sig(idx)
        .filter(|&p| ctx.tokens[p].is_punct("}"))
        .and_then(|p| ctx.matching(p))
        .and_then(|open| ctx.prev_sig(open))
        .is_some_and(|kw| ctx.tokens[kw].is_keyword("do"))
}

/// Whether the line starting at `first` carries on a binary or assignment expression
/// from the line above, with the operator at the end of that line or at its own start.
fn continues_operand(ctx: &LintContext, first: usize) -> bool {
    if ctx.is_binary_operator(first) {
        return true;
    }
    ctx.prev_sig(first).is_some_and(|prev| {
        ctx.is_binary_operator(prev) || (ctx.tokens[prev].is_punct("=>") && !ctx.tokens[first].is_punct("{"))
    })
}
