use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rules::js_utils::{is_call_paren, is_parameter_list};

/// No space between a callee and the parentheses of its argument list
#[derive(Debug, Clone, Default)]
pub struct FuncCallSpacing;

impl FuncCallSpacing {
    fn is_call(ctx: &LintContext, paren: usize) -> bool {
        if !is_call_paren(ctx, paren) || is_parameter_list(ctx, paren) {
            return false;
        }
        // `for (x of (list))` and `async (x) => x`
        ctx.prev_sig(paren).is_some_and(|callee| {
            let token = &ctx.tokens[callee];
            !(token.kind == TokenKind::Identifier && matches!(token.text, "of" | "async"))
        })
    }
}

impl Rule for FuncCallSpacing {
    fn name(&self) -> &'static str {
        "func-call-spacing"
    }

    fn description(&self) -> &'static str {
        "Calls have no space before their argument list"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &paren in ctx.significant() {
            if paren == 0 || !ctx.tokens[paren].is_punct("(") || !ctx.tokens[paren - 1].is_trivia() {
                continue;
            }
            if !Self::is_call(ctx, paren) {
                continue;
            }
            let Some(callee) = ctx.prev_sig(paren) else {
                continue;
            };
            let gap = ctx.gap(callee, paren);
            let token = &ctx.tokens[paren];
            if gap.contains('\n') {
                warnings.push(LintWarning::at_token(
                    self.name(),
                    token,
                    "Unexpected newline between function name and paren.",
                    None,
                ));
                continue;
            }
            let fix = ctx
                .gap_is_blank(callee, paren)
                .then(|| Fix::remove(ctx.tokens[callee].end..token.start));
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                "Unexpected whitespace between function name and paren.",
                fix,
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
        Box::new(FuncCallSpacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content);
        FuncCallSpacing.fix(&ctx).unwrap()
    }

    #[test]
    fn test_space_removed() {
        let ctx = LintContext::new("foo ();");
        let warnings = FuncCallSpacing.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Unexpected whitespace between function name and paren.");
        assert_eq!(fix("foo ();"), "foo();");
    }

    #[test]
    fn test_keyword_named_members_are_callees() {
        assert_eq!(
            fix("cache.delete (key);\npromise.catch (handle);"),
            "cache.delete(key);\npromise.catch(handle);"
        );
    }

    #[test]
    fn test_other_callees() {
        assert_eq!(fix("new Foo (1);\narr[0] (2);\nmake() (3);"), "new Foo(1);\narr[0](2);\nmake()(3);");
    }

    #[test]
    fn test_declarations_untouched() {
        let ctx = LintContext::new(
            "function foo (a) {}\nvar f = function (x) {};\nvar g = async (x) => x;\nif (a) {}\nvar o = { run () {} };\nfor (const v of (list)) {}",
        );
        assert!(FuncCallSpacing.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_newline_reported_without_fix() {
        let ctx = LintContext::new("foo\n(1);");
        let warnings = FuncCallSpacing.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].fix.is_none());
    }
}
