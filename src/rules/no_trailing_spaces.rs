use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use std::collections::HashSet;

const TRAILING: &[char] = &[' ', '\t', '\u{a0}', '\u{3000}'];

/// Strip whitespace at the end of lines. Lines holding a comment are skipped, as is
/// whitespace that belongs to a multi-line string, template or comment.
#[derive(Debug, Clone, Default)]
pub struct NoTrailingSpaces;

impl NoTrailingSpaces {
    fn comment_lines(ctx: &LintContext) -> HashSet<usize> {
        ctx.tokens
            .iter()
            .filter(|t| t.is_comment())
            .flat_map(|t| t.line..=t.end_line)
            .collect()
    }
}

impl Rule for NoTrailingSpaces {
    fn name(&self) -> &'static str {
        "no-trailing-spaces"
    }

    fn description(&self) -> &'static str {
        "Lines do not end with whitespace"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        let comment_lines = Self::comment_lines(ctx);

        for (idx, text) in ctx.lines.iter().enumerate() {
            let line = idx + 1;
            let kept = text.trim_end_matches(TRAILING);
            if kept.len() == text.len() || comment_lines.contains(&line) || ctx.starts_inside_token(line + 1) {
                continue;
            }
            let start = ctx.line_offsets[idx] + kept.len();
            let end = ctx.line_offsets[idx] + text.len();
            warnings.push(LintWarning {
                message: "Trailing spaces not allowed.".to_string(),
                line,
                column: kept.chars().count() + 1,
                end_line: line,
                end_column: text.chars().count() + 1,
                severity: Severity::Error,
                fix: Some(Fix::remove(start..end)),
                rule_name: Some(self.name()),
            });
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
        Box::new(NoTrailingSpaces)
    }
}
