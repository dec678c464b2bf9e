use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Require spacing around infix operators
#[derive(Debug, Clone, Default)]
pub struct SpaceInfixOps;

impl Rule for SpaceInfixOps {
    fn name(&self) -> &'static str {
        "space-infix-ops"
    }

    fn description(&self) -> &'static str {
        "Infix operators are surrounded by spaces"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &op in ctx.significant() {
            if op == 0 || op + 1 >= ctx.tokens.len() || !ctx.is_binary_operator(op) {
                continue;
            }
            let token = &ctx.tokens[op];
            let spaced_before = ctx.tokens[op - 1].is_trivia();
            let spaced_after = ctx.tokens[op + 1].is_trivia();
            if spaced_before && spaced_after {
                continue;
            }

            let mut replacement = String::new();
            if !spaced_before {
                replacement.push(' ');
            }
            replacement.push_str(token.text);
            if !spaced_after {
                replacement.push(' ');
            }
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                format!("Operator '{}' must be spaced.", token.text),
                Some(Fix::replace(token.start..token.end, replacement)),
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
        Box::new(SpaceInfixOps)
    }
}
