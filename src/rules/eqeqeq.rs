use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory};

/// Require `===`/`!==`, except where loose equality is unambiguous: comparing two
/// literals, comparing against `null`, or comparing the result of `typeof`.
#[derive(Debug, Clone, Default)]
pub struct Eqeqeq;

impl Eqeqeq {
    fn is_typeof_operand(ctx: &LintContext, op: usize) -> bool {
        let left_is_typeof = ctx
            .prev_sig(op)
            .and_then(|left| ctx.prev_sig(left))
            .is_some_and(|t| ctx.tokens[t].is_keyword("typeof"));
        let right_is_typeof = ctx.next_sig(op).is_some_and(|t| ctx.tokens[t].is_keyword("typeof"));
        left_is_typeof || right_is_typeof
    }

    fn is_smart_exception(ctx: &LintContext, op: usize) -> bool {
        let (Some(left), Some(right)) = (ctx.prev_sig(op), ctx.next_sig(op)) else {
            return true;
        };
        let left = &ctx.tokens[left];
        let right = &ctx.tokens[right];
        left.is_keyword("null")
            || right.is_keyword("null")
            || (left.is_literal() && right.is_literal())
            || Self::is_typeof_operand(ctx, op)
    }
}

impl Rule for Eqeqeq {
    fn name(&self) -> &'static str {
        "eqeqeq"
    }

    fn description(&self) -> &'static str {
        "Use strict equality where loose equality is ambiguous"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let token = &ctx.tokens[idx];
            let expected = match token.text {
                "==" => "===",
                "!=" => "!==",
                _ => continue,
            };
            if Self::is_smart_exception(ctx, idx) {
                continue;
            }
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                format!("Expected '{expected}' and instead saw '{}'.", token.text),
                None,
            ));
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Operators
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(Eqeqeq)
    }
}
