use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Disallow an `else` block after an `if` block that ends in `return`
#[derive(Debug, Clone, Default)]
pub struct NoElseReturn;

impl NoElseReturn {
    /// Whether the block at `open` ends with a `return` statement on its own level
    fn ends_with_return(ctx: &LintContext, open: usize, close: usize) -> bool {
        let statements: Vec<usize> = ctx
            .significant()
            .iter()
            .copied()
            .filter(|&i| i > open && i < close && ctx.enclosing(i) == Some(open))
            .collect();
        let Some(ret) = statements.iter().rposition(|&i| ctx.tokens[i].is_keyword("return")) else {
            return false;
        };
        // The return statement's own semicolon, if any, must be the last token on this level
        let rest = &statements[ret + 1..];
        rest.iter()
            .position(|&i| ctx.tokens[i].is_punct(";"))
            .is_none_or(|semi| semi + 1 == rest.len())
    }

    fn declares_block_scoped(ctx: &LintContext, open: usize, close: usize) -> bool {
        ctx.significant().iter().any(|&i| {
            i > open
                && i < close
                && ctx.enclosing(i) == Some(open)
                && ctx.tokens[i].is_any_keyword(&["let", "const", "class", "function"])
        })
    }
}

impl Rule for NoElseReturn {
    fn name(&self) -> &'static str {
        "no-else-return"
    }

    fn description(&self) -> &'static str {
        "No else block after an if block that returns"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &else_kw in ctx.significant() {
            if !ctx.tokens[else_kw].is_keyword("else") {
                continue;
            }
            let Some(else_open) = ctx.next_sig(else_kw).filter(|&i| ctx.tokens[i].is_punct("{")) else {
                continue;
            };
            let Some(else_close) = ctx.matching(else_open) else {
                continue;
            };

            // `if (...) { ... } else { ... }` with a plain, non-chained if
            let Some(if_close) = ctx.prev_sig(else_kw).filter(|&i| ctx.tokens[i].is_punct("}")) else {
                continue;
            };
            let Some(if_open) = ctx.matching(if_close) else {
                continue;
            };
            let Some(if_kw) = ctx
                .prev_sig(if_open)
                .filter(|&i| ctx.tokens[i].is_punct(")"))
                .and_then(|paren| ctx.matching(paren))
                .and_then(|paren| ctx.prev_sig(paren))
                .filter(|&i| ctx.tokens[i].is_keyword("if"))
            else {
                continue;
            };
            if ctx.prev_sig(if_kw).is_some_and(|p| ctx.tokens[p].is_keyword("else")) {
                continue;
            }
            if !Self::ends_with_return(ctx, if_open, if_close) {
                continue;
            }

            let fix = (!Self::declares_block_scoped(ctx, else_open, else_close)).then(|| {
                let body = ctx.content[ctx.tokens[else_open].end..ctx.tokens[else_close].start].trim();
                let replacement = if body.is_empty() {
                    String::new()
                } else {
                    format!("\n{}{body}", ctx.indentation(ctx.tokens[if_kw].line))
                };
                Fix::replace(ctx.tokens[if_close].end..ctx.tokens[else_close].end, replacement)
            });
            warnings.push(LintWarning::at_token(
                self.name(),
                &ctx.tokens[else_kw],
                "Unnecessary 'else' after 'return'.",
                fix,
            ));
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::ControlFlow
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(NoElseReturn)
    }
}
