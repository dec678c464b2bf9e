use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// No space before a comma, one space after it
#[derive(Debug, Clone, Default)]
pub struct CommaSpacing;

impl Rule for CommaSpacing {
    fn name(&self) -> &'static str {
        "comma-spacing"
    }

    fn description(&self) -> &'static str {
        "Commas are followed, not preceded, by a space"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let token = &ctx.tokens[idx];
            if !token.is_punct(",") {
                continue;
            }

            // Space before, unless the left side is a hole or starts the list
            if idx >= 2
                && ctx.tokens[idx - 1].kind == TokenKind::Whitespace
                && ctx.tokens[idx - 2].kind != TokenKind::Newline
                && !ctx.tokens[idx - 2].is_punct(",")
                && !ctx.tokens[idx - 2].is_opener()
            {
                let space = &ctx.tokens[idx - 1];
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "There should be no space before ','.",
                    Some(Fix::remove(space.start..space.end)),
                ));
            }

            if let Some(after) = ctx.tokens.get(idx + 1)
                && !after.is_blank()
                && !after.is_closer()
                && !after.is_punct(",")
            {
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "A space is required after ','.",
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
        Box::new(CommaSpacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_space_after() {
        let ctx = LintContext::new("f(a,b,c);");
        let warnings = CommaSpacing.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(CommaSpacing.fix(&ctx).unwrap(), "f(a, b, c);");
    }

    #[test]
    fn test_space_before() {
        let ctx = LintContext::new("f(a , b);");
        assert_eq!(CommaSpacing.fix(&ctx).unwrap(), "f(a, b);");
    }

    #[test]
    fn test_line_break_after_comma_is_fine() {
        let ctx = LintContext::new("f(a,\n  b);");
        assert!(CommaSpacing.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_holes_and_comma_first() {
        let ctx = LintContext::new("var a = [, , 1];\nvar b = [1\n    , 2];");
        assert!(CommaSpacing.check(&ctx).unwrap().is_empty());
    }
}
