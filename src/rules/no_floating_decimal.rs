use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Numbers have digits on both sides of their decimal point
#[derive(Debug, Clone, Default)]
pub struct NoFloatingDecimal;

impl Rule for NoFloatingDecimal {
    fn name(&self) -> &'static str {
        "no-floating-decimal"
    }

    fn description(&self) -> &'static str {
        "Decimal points are surrounded by digits"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for (idx, token) in ctx.tokens.iter().enumerate() {
            if token.kind != TokenKind::Number {
                continue;
            }
            if token.text.starts_with('.') {
                // `return.5` needs a space once the zero is added
                let glued_to_word = idx > 0
                    && matches!(ctx.tokens[idx - 1].kind, TokenKind::Identifier | TokenKind::Keyword);
                let zero = if glued_to_word { " 0" } else { "0" };
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "A leading decimal point can be confusing.",
                    Some(Fix::insert(token.start, zero)),
                ));
            } else if token.text.ends_with('.') {
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "A trailing decimal point can be confusing.",
                    Some(Fix::insert(token.end, "0")),
                ));
            }
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Literals
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(NoFloatingDecimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content);
        NoFloatingDecimal.fix(&ctx).unwrap()
    }

    #[test]
    fn test_leading_and_trailing() {
        let ctx = LintContext::new("var a = .5, b = 2.;");
        let warnings = NoFloatingDecimal.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "A leading decimal point can be confusing.");
        assert_eq!(warnings[1].message, "A trailing decimal point can be confusing.");
        assert_eq!(fix("var a = .5, b = 2.;"), "var a = 0.5, b = 2.0;");
    }

    #[test]
    fn test_glued_keyword() {
        assert_eq!(fix("function f() { return.5; }"), "function f() { return 0.5; }");
    }

    #[test]
    fn test_valid_numbers() {
        let ctx = LintContext::new("var a = 0.5 + 1e3 + 0x1f + 10n + obj.prop + [1, 2].length;");
        assert!(NoFloatingDecimal.check(&ctx).unwrap().is_empty());
    }
}
