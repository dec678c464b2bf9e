use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// No space between an object key and its colon, one space after the colon
#[derive(Debug, Clone, Default)]
pub struct KeySpacing;

impl Rule for KeySpacing {
    fn name(&self) -> &'static str {
        "key-spacing"
    }

    fn description(&self) -> &'static str {
        "Object keys are followed by a colon and exactly one space"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &colon in ctx.significant() {
            if !ctx.is_object_key_colon(colon) {
                continue;
            }
            let (Some(key), Some(value)) = (ctx.prev_sig(colon), ctx.next_sig(colon)) else {
                continue;
            };
            let key_token = &ctx.tokens[key];
            let colon_token = &ctx.tokens[colon];
            let value_token = &ctx.tokens[value];

            if colon > 0
                && ctx.tokens[colon - 1].kind == TokenKind::Whitespace
                && key == colon - 2
            {
                let space = &ctx.tokens[colon - 1];
                warnings.push(LintWarning::at_token(
                    self.name(),
                    key_token,
                    format!("Extra space after key '{}'.", key_token.text),
                    Some(Fix::remove(space.start..space.end)),
                ));
            }

            if value_token.line != colon_token.line || !ctx.gap_is_blank(colon, value) {
                continue;
            }
            let gap = ctx.gap(colon, value);
            if gap == " " {
                continue;
            }
            let message = if gap.is_empty() {
                format!("Missing space before value for key '{}'.", key_token.text)
            } else {
                format!("Extra space before value for key '{}'.", key_token.text)
            };
            warnings.push(LintWarning::at_token(
                self.name(),
                value_token,
                message,
                Some(Fix::replace(colon_token.end..value_token.start, " ")),
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
        Box::new(KeySpacing)
    }
}
