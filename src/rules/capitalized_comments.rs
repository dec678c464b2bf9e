use crate::lexer::Token;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rules::js_utils::comment_value;
use regex::Regex;
use std::sync::LazyLock;

// Tool directives, call references such as `render()` and URLs are left alone
static IGNORED_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:eslint|jshint|jslint|istanbul|globals?|exported|jscs)\b|[\w]+\(\)|[^:/?#\s]+://)").unwrap()
});

/// Comments start with an uppercase letter. A comment directly following another
/// comment continues its sentence and is not checked.
#[derive(Debug, Clone, Default)]
pub struct CapitalizedComments;

impl CapitalizedComments {
    /// Byte offset (within the token) of a lowercase first letter, if any
    fn lowercase_start(token: &Token) -> Option<usize> {
        let value = comment_value(token.text);
        let without_stars = value.replace('*', "");
        if IGNORED_COMMENT.is_match(&without_stars) {
            return None;
        }
        // Both `//` and `/*` are two bytes
        let value_offset = 2;
        let (pos, first) = value.char_indices().find(|(_, c)| !c.is_whitespace() && *c != '*')?;
        first.is_lowercase().then_some(value_offset + pos)
    }
}

impl Rule for CapitalizedComments {
    fn name(&self) -> &'static str {
        "capitalized-comments"
    }

    fn description(&self) -> &'static str {
        "Comments begin with a capital letter"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        let mut previous_non_blank: Option<&Token> = None;
        for token in &ctx.tokens {
            if token.is_blank() {
                continue;
            }
            let follows_comment = previous_non_blank.is_some_and(|prev| prev.is_comment());
            previous_non_blank = Some(token);
            if !token.is_comment() || follows_comment {
                continue;
            }
            let Some(offset) = Self::lowercase_start(token) else {
                continue;
            };
            let start = token.start + offset;
            let Some(first) = ctx.content[start..].chars().next() else {
                continue;
            };
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                "Comments should not begin with a lowercase character.",
                Some(Fix::replace(start..start + first.len_utf8(), first.to_uppercase().to_string())),
            ));
        }

        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains("//") && !ctx.content.contains("/*")
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Comments
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(CapitalizedComments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content);
        CapitalizedComments.fix(&ctx).unwrap()
    }

    #[test]
    fn test_line_and_block_comments() {
        let ctx = LintContext::new("// set up\nvar a = 1; /* done */");
        let warnings = CapitalizedComments.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "Comments should not begin with a lowercase character.");
        assert_eq!(fix("// set up\nvar a = 1; /* done */"), "// Set up\nvar a = 1; /* Done */");
    }

    #[test]
    fn test_doc_comment_after_stars() {
        assert_eq!(fix("/**\n * returns a value\n */"), "/**\n * Returns a value\n */");
    }

    #[test]
    fn test_consecutive_comments_ignored() {
        assert_eq!(fix("// First line\n// continues here\nx();"), "// First line\n// continues here\nx();");
        assert_eq!(fix("// first\n\n// second"), "// First\n\n// second");
    }

    #[test]
    fn test_ignored_patterns() {
        let ctx = LintContext::new(
            "a();\n// render() is called later\nb();\n// eslint-disable-line\nc();\n// https://example.com\nd();\n// 42 items",
        );
        assert!(CapitalizedComments.check(&ctx).unwrap().is_empty());
    }
}
