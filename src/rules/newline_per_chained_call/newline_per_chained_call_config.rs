use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

/// Configuration for newline-per-chained-call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct NewlinePerChainedCallConfig {
    /// Calls allowed on one line before the chain must be broken (default: 1)
    #[serde(default = "default_ignore_chain_with_depth", alias = "ignore_chain_with_depth")]
    pub ignore_chain_with_depth: usize,
}

fn default_ignore_chain_with_depth() -> usize {
    1
}

impl Default for NewlinePerChainedCallConfig {
    fn default() -> Self {
        Self {
            ignore_chain_with_depth: default_ignore_chain_with_depth(),
        }
    }
}

impl RuleConfig for NewlinePerChainedCallConfig {
    const RULE_NAME: &'static str = "newline-per-chained-call";
}
