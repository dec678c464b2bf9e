use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

/// Configuration for indent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct IndentConfig {
    /// Spaces per indentation level (default: 4)
    #[serde(default = "default_width")]
    pub width: usize,

    /// Levels of `case` clauses inside `switch` (default: 1)
    #[serde(default = "default_switch_case", alias = "switch_case")]
    pub switch_case: usize,
}

fn default_width() -> usize {
    4
}

fn default_switch_case() -> usize {
    1
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            switch_case: default_switch_case(),
        }
    }
}

impl RuleConfig for IndentConfig {
    const RULE_NAME: &'static str = "indent";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_canonical_format() {
        let config: IndentConfig = toml::from_str("width = 2\nswitch-case = 0").unwrap();
        assert_eq!(config.width, 2);
        assert_eq!(config.switch_case, 0);
    }

    #[test]
    fn test_snake_case_alias() {
        let config: IndentConfig = toml::from_str("switch_case = 2").unwrap();
        assert_eq!(config.width, 4);
        assert_eq!(config.switch_case, 2);
    }
}
