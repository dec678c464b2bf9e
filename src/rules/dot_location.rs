use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Member access dots sit on the same line as the property
#[derive(Debug, Clone, Default)]
pub struct DotLocation;

impl Rule for DotLocation {
    fn name(&self) -> &'static str {
        "dot-location"
    }

    fn description(&self) -> &'static str {
        "A member-access dot belongs on the line of its property"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let dot = &ctx.tokens[idx];
            if !(dot.is_punct(".") || dot.is_punct("?.")) {
                continue;
            }
            let Some(property) = ctx.next_sig(idx) else {
                continue;
            };
            let property_token = &ctx.tokens[property];
            if !matches!(property_token.kind, TokenKind::Identifier | TokenKind::Keyword)
                || property_token.line == dot.line
            {
                continue;
            }
            let between = &ctx.content[dot.end..property_token.start];
            let replacement = format!("{between}{}", dot.text);
            warnings.push(LintWarning::at_token(
                self.name(),
                dot,
                "Expected dot to be in same line as property.",
                Some(Fix::replace(dot.start..property_token.start, replacement)),
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
        Box::new(DotLocation)
    }
}
