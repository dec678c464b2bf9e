use crate::lint_context::{BraceKind, LintContext};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rules::js_utils::{CONTROL_KEYWORDS, at_statement_start};

/// Disallow empty statements: doubled semicolons and semicolons after block bodies
/// of declarations and control statements
#[derive(Debug, Clone, Default)]
pub struct NoExtraSemi;

impl NoExtraSemi {
    fn in_for_head(ctx: &LintContext, idx: usize) -> bool {
        ctx.enclosing(idx)
            .filter(|&open| ctx.tokens[open].is_punct("("))
            .and_then(|open| ctx.prev_sig(open))
            .is_some_and(|kw| ctx.tokens[kw].is_keyword("for"))
    }

    /// Whether `}` closes a body that is a statement on its own (not an expression)
    fn closes_statement_body(ctx: &LintContext, close: usize) -> bool {
        if ctx.closing_brace_kind(close) != Some(BraceKind::Block) {
            return false;
        }
        let Some(open) = ctx.matching(close) else {
            return false;
        };
        let Some(before) = ctx.prev_sig(open) else {
            // A bare block statement
            return true;
        };
        let token = &ctx.tokens[before];
        if token.is_any_keyword(&["else", "try", "finally"]) {
            return true;
        }
        if !token.is_punct(")") {
            return token.is_punct(";") || token.is_punct("{") || token.is_punct("}");
        }
        let Some(head) = ctx.matching(before).and_then(|paren| ctx.prev_sig(paren)) else {
            return false;
        };
        let head_token = &ctx.tokens[head];
        if head_token.is_any_keyword(CONTROL_KEYWORDS) {
            return true;
        }
        // `function name(...) { }` at statement level
        ctx.prev_sig(head)
            .filter(|&kw| ctx.tokens[kw].is_keyword("function"))
            .is_some_and(|kw| at_statement_start(ctx, kw))
    }
}

impl Rule for NoExtraSemi {
    fn name(&self) -> &'static str {
        "no-extra-semi"
    }

    fn description(&self) -> &'static str {
        "No unnecessary semicolons"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let token = &ctx.tokens[idx];
            if !token.is_punct(";") || Self::in_for_head(ctx, idx) {
                continue;
            }
            let extra = match ctx.prev_sig(idx) {
                None => true,
                Some(prev) => {
                    let prev_token = &ctx.tokens[prev];
                    prev_token.is_punct(";")
                        || (prev_token.is_punct("{") && ctx.brace_kind(prev) == Some(BraceKind::Block))
                        || (prev_token.is_punct("}") && Self::closes_statement_body(ctx, prev))
                }
            };
            if extra {
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "Unnecessary semicolon.",
                    Some(Fix::remove(token.start..token.end)),
                ));
            }
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Whitespace
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(NoExtraSemi)
    }
}
