use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rules::js_utils::comment_value;

/// Comments start with a space after `//` or `/*`
#[derive(Debug, Clone, Default)]
pub struct SpacedComment;

impl Rule for SpacedComment {
    fn name(&self) -> &'static str {
        "spaced-comment"
    }

    fn description(&self) -> &'static str {
        "Comment markers are followed by whitespace"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for token in &ctx.tokens {
            let marker = match token.kind {
                TokenKind::LineComment => "//",
                TokenKind::BlockComment => "/*",
                _ => continue,
            };
            let value = comment_value(token.text);
            let Some(first) = value.chars().next() else {
                continue;
            };
            // Doc comments (`/**`) count as spaced
            if first.is_whitespace() || (token.kind == TokenKind::BlockComment && first == '*') {
                continue;
            }
            warnings.push(
                LintWarning::at_token(
                    self.name(),
                    token,
                    format!("Expected space or tab after '{marker}' in comment."),
                    Some(Fix::insert(token.start + 2, " ")),
                )
                .with_severity(Severity::Warning),
            );
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Comments
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(SpacedComment)
    }
}
