use crate::lexer::TokenKind;
use crate::lint_context::{BraceKind, LintContext};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rules::js_utils::is_parameter_list;

const MESSAGE: &str = "Missing space before function parentheses.";

/// Always put a space before the parameter list of functions, methods and async arrows
#[derive(Debug, Clone, Default)]
pub struct SpaceBeforeFunctionParen;

impl SpaceBeforeFunctionParen {
    /// Whether the `(` at `paren` starts a function's parameter list
    fn is_function_params(ctx: &LintContext, paren: usize) -> bool {
        let Some(prev) = ctx.prev_sig(paren) else {
            return false;
        };
        let token = &ctx.tokens[prev];

        // function (, function* (
        if token.is_keyword("function") {
            return true;
        }
        if token.is_punct("*") {
            return ctx.prev_sig(prev).is_some_and(|p| ctx.tokens[p].is_keyword("function"));
        }
        if token.kind != TokenKind::Identifier {
            return false;
        }

        // function name (, function* name (
        if let Some(before) = ctx.prev_sig(prev) {
            let before_token = &ctx.tokens[before];
            if before_token.is_keyword("function") {
                return true;
            }
            if before_token.is_punct("*") && ctx.prev_sig(before).is_some_and(|p| ctx.tokens[p].is_keyword("function")) {
                return true;
            }
        }

        // async (x) => ...
        let next_after_params = ctx.matching(paren).and_then(|close| ctx.next_sig(close));
        if token.text == "async" && next_after_params.is_some_and(|n| ctx.tokens[n].is_punct("=>")) {
            return true;
        }

        // Method definitions inside object literals and class bodies
        let in_object_or_class = ctx.enclosing(prev).is_some_and(|open| {
            ctx.brace_kind(open) == Some(BraceKind::Object)
                || ctx
                    .prev_sig(open)
                    .and_then(|p| ctx.prev_sig(p))
                    .is_some_and(|p| ctx.tokens[p].is_any_keyword(&["class", "extends"]))
        });
        let is_member = ctx.prev_sig(prev).is_some_and(|p| ctx.tokens[p].is_punct("."));
        in_object_or_class
            && !is_member
            && next_after_params.is_some_and(|n| ctx.tokens[n].is_punct("{"))
            && is_parameter_list(ctx, paren)
    }
}

impl Rule for SpaceBeforeFunctionParen {
    fn name(&self) -> &'static str {
        "space-before-function-paren"
    }

    fn description(&self) -> &'static str {
        "Function parameter lists are preceded by a space"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &paren in ctx.significant() {
            if !ctx.tokens[paren].is_punct("(") || paren == 0 {
                continue;
            }
            let before = &ctx.tokens[paren - 1];
            if before.is_trivia() || !Self::is_function_params(ctx, paren) {
                continue;
            }
            warnings.push(LintWarning::at_token(
                self.name(),
                &ctx.tokens[paren],
                MESSAGE,
                Some(Fix::insert(before.end, " ")),
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
        Box::new(SpaceBeforeFunctionParen)
    }
}
