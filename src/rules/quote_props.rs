use crate::lexer::TokenKind;
use crate::lint_context::{BraceKind, LintContext};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Object literal keys are either all quoted or all unquoted. When both styles are
/// mixed, the unquoted keys get quoted.
#[derive(Debug, Clone, Default)]
pub struct QuoteProps;

impl QuoteProps {
    /// Key tokens of the object literal opened at `open`, skipping computed keys,
    /// shorthand properties and methods
    fn keys(ctx: &LintContext, open: usize) -> Vec<usize> {
        ctx.significant()
            .iter()
            .copied()
            .filter(|&idx| ctx.enclosing(idx) == Some(open) && ctx.is_object_key_colon(idx))
            .filter_map(|colon| ctx.prev_sig(colon))
            .filter(|&key| !ctx.tokens[key].is_punct("]"))
            .collect()
    }
}

impl Rule for QuoteProps {
    fn name(&self) -> &'static str {
        "quote-props"
    }

    fn description(&self) -> &'static str {
        "Object keys are quoted consistently"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &open in ctx.significant() {
            if !ctx.tokens[open].is_punct("{") || ctx.brace_kind(open) != Some(BraceKind::Object) {
                continue;
            }
            let keys = Self::keys(ctx, open);
            let (quoted, unquoted): (Vec<usize>, Vec<usize>) =
                keys.into_iter().partition(|&key| ctx.tokens[key].kind == TokenKind::String);
            if quoted.is_empty() {
                continue;
            }
            for key in unquoted {
                let token = &ctx.tokens[key];
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    format!("Inconsistently quoted property '{}' found.", token.text),
                    Some(Fix::replace(token.start..token.end, format!("'{}'", token.text))),
                ));
            }
        }

        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('{')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Literals
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(QuoteProps)
    }
}
