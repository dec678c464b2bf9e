use crate::lint_context::{BraceKind, LintContext};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

const OPEN_NEXT_LINE: &str = "Opening curly brace does not appear on the same line as controlling statement.";
const BODY_SAME_LINE: &str = "Statement inside of curly braces should be on next line.";
const CLOSE_SAME_LINE: &str =
    "Closing curly brace should be on the same line as opening curly brace or on the line after the previous block.";
const CLOSE_NEXT_LINE: &str = "Closing curly brace does not appear on the same line as the subsequent block.";

/// One true brace style without single-line blocks: block braces open on the line
/// of their controlling statement, and their contents start and end on lines of
/// their own.
#[derive(Debug, Clone, Default)]
pub struct BraceStyle;

impl BraceStyle {
    fn controls_block(ctx: &LintContext, prev: usize) -> bool {
        let token = &ctx.tokens[prev];
        token.is_punct(")") || token.is_punct("=>") || token.is_any_keyword(&["else", "try", "finally", "do"])
    }

    /// Replace a blank gap between two tokens, or insert at `fallback` when the gap holds comments
    fn gap_fix(ctx: &LintContext, a: usize, b: usize, replacement: &str, fallback: usize) -> Fix {
        if ctx.gap_is_blank(a, b) {
            Fix::replace(ctx.tokens[a].end..ctx.tokens[b].start, replacement)
        } else {
            Fix::insert(fallback, replacement)
        }
    }
}

impl Rule for BraceStyle {
    fn name(&self) -> &'static str {
        "brace-style"
    }

    fn description(&self) -> &'static str {
        "Block braces follow the one true brace style"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &open in ctx.significant() {
            if ctx.brace_kind(open) != Some(BraceKind::Block) {
                continue;
            }
            let open_token = &ctx.tokens[open];

            if let Some(prev) = ctx.prev_sig(open)
                && Self::controls_block(ctx, prev)
                && ctx.tokens[prev].line != open_token.line
            {
                let fix = ctx
                    .gap_is_blank(prev, open)
                    .then(|| Fix::replace(ctx.tokens[prev].end..open_token.start, " "));
                warnings.push(LintWarning::at_token(self.name(), open_token, OPEN_NEXT_LINE, fix));
            }

            let Some(close) = ctx.matching(open) else {
                continue;
            };
            let close_token = &ctx.tokens[close];

            if let Some(first) = ctx.next_sig(open)
                && first != close
            {
                if ctx.tokens[first].line == open_token.line {
                    let fix = Self::gap_fix(ctx, open, first, "\n", open_token.end);
                    warnings.push(LintWarning::at_token(self.name(), open_token, BODY_SAME_LINE, Some(fix)));
                }
                if let Some(last) = ctx.prev_sig(close)
                    && ctx.tokens[last].end_line == close_token.line
                {
                    let fix = Self::gap_fix(ctx, last, close, "\n", close_token.start);
                    warnings.push(LintWarning::at_token(self.name(), close_token, CLOSE_SAME_LINE, Some(fix)));
                }
            }

            if let Some(next) = ctx.next_sig(close)
                && ctx.tokens[next].is_any_keyword(&["else", "catch", "finally"])
                && ctx.tokens[next].line != close_token.line
            {
                let fix = ctx
                    .gap_is_blank(close, next)
                    .then(|| Fix::replace(close_token.end..ctx.tokens[next].start, " "));
                warnings.push(LintWarning::at_token(self.name(), close_token, CLOSE_NEXT_LINE, fix));
            }
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Braces
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(BraceStyle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content);
        BraceStyle.fix(&ctx).unwrap()
    }

    #[test]
    fn test_valid_block() {
        let ctx = LintContext::new("if (a) {\n    b();\n} else {\n    c();\n}");
        assert!(BraceStyle.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_empty_block_allowed() {
        let ctx = LintContext::new("function f() {}");
        assert!(BraceStyle.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_opening_brace_on_next_line() {
        let ctx = LintContext::new("if (a)\n{\n    b();\n}");
        let warnings = BraceStyle.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, OPEN_NEXT_LINE);
        assert_eq!(fix("if (a)\n{\n    b();\n}"), "if (a) {\n    b();\n}");
    }

    #[test]
    fn test_single_line_block_split() {
        assert_eq!(fix("function f() { return 1; }"), "function f() {\nreturn 1;\n}");
    }

    #[test]
    fn test_else_on_next_line() {
        assert_eq!(
            fix("if (a) {\n    b();\n}\nelse {\n    c();\n}"),
            "if (a) {\n    b();\n} else {\n    c();\n}"
        );
    }

    #[test]
    fn test_object_literals_ignored() {
        let ctx = LintContext::new("var o = { a: 1 };");
        assert!(BraceStyle.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_comment_between_keeps_report_without_fix() {
        let ctx = LintContext::new("if (a) // why\n{\n    b();\n}");
        let warnings = BraceStyle.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].fix.is_none());
    }
}
