use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// No space before a semicolon, one space after it when more code follows on the line
#[derive(Debug, Clone, Default)]
pub struct SemiSpacing;

impl Rule for SemiSpacing {
    fn name(&self) -> &'static str {
        "semi-spacing"
    }

    fn description(&self) -> &'static str {
        "Semicolons are followed, not preceded, by a space"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let token = &ctx.tokens[idx];
            if !token.is_punct(";") {
                continue;
            }

            let prev = ctx.prev_sig(idx);
            let skip_before = prev.is_none_or(|p| ctx.tokens[p].is_punct(";") || ctx.tokens[p].is_punct("("));
            if !skip_before
                && idx >= 2
                && ctx.tokens[idx - 1].kind == TokenKind::Whitespace
                && ctx.tokens[idx - 2].kind != TokenKind::Newline
            {
                let space = &ctx.tokens[idx - 1];
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "Unexpected whitespace before semicolon.",
                    Some(Fix::remove(space.start..space.end)),
                ));
            }

            if let Some(next) = ctx.next_sig(idx)
                && ctx.tokens[next].line == token.line
                && !ctx.tokens[next].is_punct(")")
                && !ctx.tokens[next].is_punct("}")
                && !ctx.tokens[next].is_punct(";")
                && ctx.tokens.get(idx + 1).is_some_and(|after| !after.is_blank())
            {
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "Missing whitespace after semicolon.",
                    Some(Fix::insert(token.end, " ")),
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
        Box::new(SemiSpacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_before_removed() {
        let ctx = LintContext::new("a() ;");
        assert_eq!(SemiSpacing.fix(&ctx).unwrap(), "a();");
    }

    #[test]
    fn test_space_after_inserted() {
        let ctx = LintContext::new("for (i = 0;i < n;i++) {}");
        assert_eq!(SemiSpacing.check(&ctx).unwrap().len(), 2);
        assert_eq!(SemiSpacing.fix(&ctx).unwrap(), "for (i = 0; i < n; i++) {}");
    }

    #[test]
    fn test_end_of_line_and_empty_for_parts() {
        let ctx = LintContext::new("a();\nfor (;;) {}\nb(); // done");
        assert!(SemiSpacing.check(&ctx).unwrap().is_empty());
    }
}
