use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rule_config_serde::{config_section, load_rule_config};
use crate::utils::{StrExt, expected_levels};

mod indent_config;
pub use indent_config::IndentConfig;

/// Indent with a fixed number of spaces per bracket level
#[derive(Debug, Clone, Default)]
pub struct Indent {
    config: IndentConfig,
}

impl Indent {
    pub fn new(width: usize, switch_case: usize) -> Self {
        Self {
            config: IndentConfig { width, switch_case },
        }
    }

    pub const fn from_config_struct(config: IndentConfig) -> Self {
        Self { config }
    }

    fn describe(actual: &str) -> String {
        let tabs = actual.chars().filter(|&c| c == '\t').count();
        let spaces = actual.chars().count() - tabs;
        match (spaces, tabs) {
            (_, 0) => format!("{spaces} space{}", if spaces == 1 { "" } else { "s" }),
            (0, _) => format!("{tabs} tab{}", if tabs == 1 { "" } else { "s" }),
            _ => format!("{spaces} spaces and {tabs} tabs"),
        }
    }
}

impl Rule for Indent {
    fn name(&self) -> &'static str {
        "indent"
    }

    fn description(&self) -> &'static str {
        "Lines are indented by a fixed width per nesting level"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        let levels = expected_levels(ctx, self.config.switch_case);

        for (idx, level) in levels.into_iter().enumerate() {
            let Some(level) = level else {
                continue;
            };
            let line = ctx.lines[idx];
            let actual = &line[..line.indent_len()];
            let expected = level * self.config.width;
            if actual.len() == expected && actual.bytes().all(|b| b == b' ') {
                continue;
            }
            let start = ctx.line_offsets[idx];
            warnings.push(LintWarning {
                message: format!(
                    "Expected indentation of {expected} space{} but found {}.",
                    if expected == 1 { "" } else { "s" },
                    Self::describe(actual)
                ),
                line: idx + 1,
                column: 1,
                end_line: idx + 1,
                end_column: actual.chars().count() + 1,
                severity: Severity::Error,
                fix: Some(Fix::replace(start..start + actual.len(), " ".repeat(expected))),
                rule_name: Some(self.name()),
            });
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Indentation
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
        let rule_config = load_rule_config::<IndentConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}
