use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Disallow trailing commas in array, object, parameter and argument lists
#[derive(Debug, Clone, Default)]
pub struct CommaDangle;

impl Rule for CommaDangle {
    fn name(&self) -> &'static str {
        "comma-dangle"
    }

    fn description(&self) -> &'static str {
        "Lists must not end with a trailing comma"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let token = &ctx.tokens[idx];
            if !token.is_punct(",") {
                continue;
            }
            let Some(next) = ctx.next_sig(idx) else {
                continue;
            };
            if !ctx.tokens[next].is_closer() {
                continue;
            }
            // `[a,,]` ends with a hole, the comma is the hole's separator
            let after_hole = ctx
                .prev_sig(idx)
                .is_some_and(|p| ctx.tokens[p].is_punct(",") || ctx.tokens[p].is_opener());
            if after_hole {
                continue;
            }
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                "Unexpected trailing comma.",
                Some(Fix::remove(token.start..token.end)),
            ));
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
        Box::new(CommaDangle)
    }
}
