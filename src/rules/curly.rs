use crate::lexer::TokenKind;
use crate::lint_context::{BraceKind, LintContext};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rules::js_utils::statement_end;
use std::collections::HashSet;

/// Require braces around bodies that span more than one line. Brace-less bodies
/// are still allowed when they fit on the line of their `if`, `else`, loop or `do`.
#[derive(Debug, Clone, Default)]
pub struct Curly;

struct Body {
    /// Token the body follows: the closing `)` of a head, or `else`/`do`
    head: usize,
    /// Keyword that owns the body
    keyword: usize,
    start: usize,
    label: String,
}

impl Curly {
    /// `while` keywords that close a `do` statement
    fn do_while_tails(ctx: &LintContext) -> HashSet<usize> {
        ctx.significant()
            .iter()
            .filter(|&&idx| ctx.tokens[idx].is_keyword("do"))
            .filter_map(|&idx| {
                let body = ctx.next_sig(idx)?;
                let end = statement_end(ctx, body)?;
                ctx.next_sig(end).filter(|&w| ctx.tokens[w].is_keyword("while"))
            })
            .collect()
    }

    fn for_label(ctx: &LintContext, open: usize, close: usize) -> &'static str {
        let head = ctx.significant().iter().filter(|&&i| i > open && i < close && ctx.enclosing(i) == Some(open));
        for &idx in head {
            let token = &ctx.tokens[idx];
            if token.is_keyword("in") {
                return "'for-in'";
            }
            if token.kind == TokenKind::Identifier && token.text == "of" {
                return "'for-of'";
            }
        }
        "'for' condition"
    }

    fn body_of(ctx: &LintContext, keyword: usize, do_while_tails: &HashSet<usize>) -> Option<Body> {
        let token = &ctx.tokens[keyword];
        match token.text {
            "if" | "for" | "while" if token.kind == TokenKind::Keyword => {
                if do_while_tails.contains(&keyword) {
                    return None;
                }
                let open = ctx.next_sig(keyword).filter(|&p| ctx.tokens[p].is_punct("("))?;
                let close = ctx.matching(open)?;
                let label = match token.text {
                    "for" => Self::for_label(ctx, open, close).to_string(),
                    kw => format!("'{kw}' condition"),
                };
                Some(Body {
                    head: close,
                    keyword,
                    start: ctx.next_sig(close)?,
                    label,
                })
            }
            "else" | "do" if token.kind == TokenKind::Keyword => {
                let start = ctx.next_sig(keyword)?;
                if token.text == "else" && ctx.tokens[start].is_keyword("if") {
                    return None;
                }
                Some(Body {
                    head: keyword,
                    keyword,
                    start,
                    label: format!("'{}'", token.text),
                })
            }
            _ => None,
        }
    }
}

impl Rule for Curly {
    fn name(&self) -> &'static str {
        "curly"
    }

    fn description(&self) -> &'static str {
        "Multi-line statement bodies are wrapped in braces"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        let do_while_tails = Self::do_while_tails(ctx);

        for &idx in ctx.significant() {
            let Some(body) = Self::body_of(ctx, idx, &do_while_tails) else {
                continue;
            };
            let first = &ctx.tokens[body.start];
            if (first.is_punct("{") && ctx.brace_kind(body.start) == Some(BraceKind::Block)) || first.is_punct(";") {
                continue;
            }
            let Some(end) = statement_end(ctx, body.start) else {
                continue;
            };
            let last = if ctx.tokens[end].is_punct(";") {
                ctx.prev_sig(end).unwrap_or(end)
            } else {
                end
            };
            let head = &ctx.tokens[body.head];
            if head.line == ctx.tokens[last].end_line {
                continue;
            }

            let fix = ctx.gap_is_blank(body.head, body.start).then(|| {
                let indent = ctx.indentation(ctx.tokens[body.keyword].line);
                let body_text = &ctx.content[first.start..ctx.tokens[end].end];
                Fix::replace(
                    head.end..ctx.tokens[end].end,
                    format!(" {{{}{body_text}\n{indent}}}", ctx.gap(body.head, body.start)),
                )
            });
            warnings.push(LintWarning::at_token(
                self.name(),
                first,
                format!("Expected {{ after {}.", body.label),
                fix,
            ));
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Braces
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(Curly)
    }
}
