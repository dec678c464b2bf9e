use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rule_config_serde::{config_section, load_rule_config};

mod no_multiple_empty_lines_config;
pub use no_multiple_empty_lines_config::NoMultipleEmptyLinesConfig;

/// Limit runs of consecutive empty lines. Lines inside template literals and
/// block comments are content, not empty lines.
#[derive(Debug, Clone, Default)]
pub struct NoMultipleEmptyLines {
    config: NoMultipleEmptyLinesConfig,
}

impl NoMultipleEmptyLines {
    pub fn new(max: usize) -> Self {
        Self::from_config_struct(NoMultipleEmptyLinesConfig { max })
    }

    pub const fn from_config_struct(config: NoMultipleEmptyLinesConfig) -> Self {
        Self { config }
    }

    fn message(&self, at_start: bool, at_end: bool) -> String {
        let max = self.config.max;
        if at_start {
            format!("Too many blank lines at the beginning of file. Max of {max} allowed.")
        } else if at_end {
            format!("Too many blank lines at the end of file. Max of {max} allowed.")
        } else {
            format!("More than {max} blank line{} not allowed.", if max == 1 { "" } else { "s" })
        }
    }
}

impl Rule for NoMultipleEmptyLines {
    fn name(&self) -> &'static str {
        "no-multiple-empty-lines"
    }

    fn description(&self) -> &'static str {
        "No more than one consecutive empty line"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        // The empty string after a final newline is not a line of its own
        let mut line_count = ctx.line_count();
        if line_count > 1 && ctx.lines[line_count - 1].is_empty() {
            line_count -= 1;
        }
        let is_blank = |idx: usize| ctx.lines[idx].trim().is_empty() && !ctx.starts_inside_token(idx + 1);

        let mut idx = 0;
        while idx < line_count {
            if !is_blank(idx) {
                idx += 1;
                continue;
            }
            let run_start = idx;
            while idx < line_count && is_blank(idx) {
                idx += 1;
            }
            let run_len = idx - run_start;
            if run_len <= self.config.max {
                continue;
            }

            let first_extra = run_start + self.config.max;
            let start = ctx.line_offsets[first_extra];
            let end = ctx.line_offsets.get(idx).copied().unwrap_or(ctx.content.len());
            warnings.push(LintWarning {
                message: self.message(run_start == 0, idx == line_count),
                line: first_extra + 1,
                column: 1,
                end_line: idx,
                end_column: 1,
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

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        config_section(&self.config)
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = load_rule_config::<NoMultipleEmptyLinesConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content);
        NoMultipleEmptyLines::default().fix(&ctx).unwrap()
    }

    #[test]
    fn test_middle_run() {
        let ctx = LintContext::new("a();\n\n\n\nb();");
        let warnings = NoMultipleEmptyLines::default().check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "More than 1 blank line not allowed.");
        assert_eq!(warnings[0].line, 3);
        assert_eq!(fix("a();\n\n\n\nb();"), "a();\n\nb();");
    }

    #[test]
    fn test_start_and_end_of_file() {
        let ctx = LintContext::new("\n\n\na();\n\n\n");
        let messages: Vec<_> = NoMultipleEmptyLines::default()
            .check(&ctx)
            .unwrap()
            .into_iter()
            .map(|w| w.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Too many blank lines at the beginning of file. Max of 1 allowed.",
                "Too many blank lines at the end of file. Max of 1 allowed."
            ]
        );
        assert_eq!(fix("\n\n\na();\n\n\n"), "\na();\n\n");
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        assert_eq!(fix("a();\n  \n\t\n\nb();"), "a();\n  \nb();");
    }

    #[test]
    fn test_template_lines_are_content() {
        let src = "var t = `a\n\n\n\nb`;";
        assert_eq!(fix(src), src);
    }

    #[test]
    fn test_custom_max() {
        let ctx = LintContext::new("a();\n\n\nb();");
        assert!(NoMultipleEmptyLines::new(2).check(&ctx).unwrap().is_empty());
    }
}
