use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Collapse runs of spaces between tokens on a line. Indentation, alignment around
/// object key colons and the gap before an end-of-line comment are left alone.
#[derive(Debug, Clone, Default)]
pub struct NoMultiSpaces;

impl NoMultiSpaces {
    fn is_eol_comment(ctx: &LintContext, idx: usize) -> bool {
        ctx.tokens[idx].is_comment()
            && ctx.tokens[idx + 1..]
                .iter()
                .find(|t| t.kind != TokenKind::Whitespace)
                .is_none_or(|t| t.kind == TokenKind::Newline)
    }
}

impl Rule for NoMultiSpaces {
    fn name(&self) -> &'static str {
        "no-multi-spaces"
    }

    fn description(&self) -> &'static str {
        "Tokens on a line are separated by at most one space"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for (idx, token) in ctx.tokens.iter().enumerate() {
            if token.kind != TokenKind::Whitespace || token.text.len() < 2 || idx == 0 {
                continue;
            }
            let left = idx - 1;
            let right = idx + 1;
            let Some(right_token) = ctx.tokens.get(right) else {
                continue;
            };
            if ctx.tokens[left].kind == TokenKind::Newline || right_token.kind == TokenKind::Newline {
                continue;
            }
            if Self::is_eol_comment(ctx, right) {
                continue;
            }
            if ctx.is_object_key_colon(left) || ctx.is_object_key_colon(right) {
                continue;
            }

            let shown = match right_token.kind {
                TokenKind::LineComment => "//",
                TokenKind::BlockComment => "/**/",
                _ => right_token.text,
            };
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                format!("Multiple spaces found before '{shown}'."),
                Some(Fix::replace(token.start..token.end, " ")),
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
        Box::new(NoMultiSpaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content);
        NoMultiSpaces.fix(&ctx).unwrap()
    }

    #[test]
    fn test_runs_collapsed() {
        let ctx = LintContext::new("var a  =   1;");
        let warnings = NoMultiSpaces.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "Multiple spaces found before '='.");
        assert_eq!(fix("var a  =   1;"), "var a = 1;");
    }

    #[test]
    fn test_indentation_and_eol_comments_kept() {
        let src = "function f() {\n        a();    // note\n    b();   /* block */\n}";
        assert_eq!(fix(src), src);
    }

    #[test]
    fn test_inline_comment_reported() {
        assert_eq!(fix("a(  /* x */ 1);"), "a( /* x */ 1);");
    }

    #[test]
    fn test_object_key_alignment_kept() {
        let src = "var o = {\n    a:     1,\n    bbb  : 2\n};";
        assert_eq!(fix(src), src);
    }
}
