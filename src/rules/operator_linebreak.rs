use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// When an expression breaks across lines, the operator ends the first line
#[derive(Debug, Clone, Default)]
pub struct OperatorLinebreak;

impl Rule for OperatorLinebreak {
    fn name(&self) -> &'static str {
        "operator-linebreak"
    }

    fn description(&self) -> &'static str {
        "Operators are placed at the end of a broken line"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &op in ctx.significant() {
            if !ctx.is_binary_operator(op) {
                continue;
            }
            let (Some(left), Some(right)) = (ctx.prev_sig(op), ctx.next_sig(op)) else {
                continue;
            };
            let op_token = &ctx.tokens[op];
            let break_before = ctx.tokens[left].end_line != op_token.line;
            let break_after = ctx.tokens[right].line != op_token.line;
            if !break_before {
                continue;
            }

            let fix = (ctx.gap_is_blank(left, op) && ctx.gap_is_blank(op, right)).then(|| {
                let before = ctx.gap(left, op);
                let after = ctx.gap(op, right);
                let replacement = if break_after {
                    format!(" {}{after}", op_token.text)
                } else {
                    format!(" {}{before}", op_token.text)
                };
                Fix::replace(ctx.tokens[left].end..ctx.tokens[right].start, replacement)
            });
            warnings.push(LintWarning::at_token(
                self.name(),
                op_token,
                format!("'{}' should be placed at the end of the line.", op_token.text),
                fix,
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
        Box::new(OperatorLinebreak)
    }
}
