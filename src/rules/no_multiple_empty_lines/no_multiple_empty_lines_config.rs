use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

/// Configuration for no-multiple-empty-lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct NoMultipleEmptyLinesConfig {
    /// Maximum consecutive empty lines (default: 1)
    #[serde(default = "default_max")]
    pub max: usize,
}

fn default_max() -> usize {
    1
}

impl Default for NoMultipleEmptyLinesConfig {
    fn default() -> Self {
        Self { max: default_max() }
    }
}

impl RuleConfig for NoMultipleEmptyLinesConfig {
    const RULE_NAME: &'static str = "no-multiple-empty-lines";
}
