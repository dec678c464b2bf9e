//!
//! This module defines the Rule trait and related types for implementing style rules in snipfmt.
//! Rules inspect a shared [`LintContext`] and return warnings that optionally carry a fix.

use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

use crate::lexer::Token;
use crate::lint_context::LintContext;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fix failed: {0}")]
    FixFailed(String),
    #[error("Parsing error: {0}")]
    ParsingError(String),
}

pub type LintResult = Result<Vec<LintWarning>, LintError>;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LintWarning {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub severity: Severity,
    pub fix: Option<Fix>,
    pub rule_name: Option<&'static str>,
}

impl LintWarning {
    /// Warning spanning a single token
    pub fn at_token(rule_name: &'static str, token: &Token, message: impl Into<String>, fix: Option<Fix>) -> Self {
        let last_line = token.text.rsplit('\n').next().unwrap_or("");
        let end_column = if token.end_line == token.line {
            token.column + token.text.chars().count()
        } else {
            last_line.chars().count() + 1
        };
        Self {
            message: message.into(),
            line: token.line,
            column: token.column,
            end_line: token.end_line,
            end_column,
            severity: Severity::Error,
            fix,
            rule_name: Some(rule_name),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Fix {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    pub fn remove(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Type of rule, used for grouping in `snipfmt rules`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    Braces,
    Whitespace,
    Indentation,
    Comments,
    Literals,
    Operators,
    ControlFlow,
}

pub trait Rule: DynClone + Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn check(&self, ctx: &LintContext) -> LintResult;

    /// Apply this rule's own fixes once
    fn fix(&self, ctx: &LintContext) -> Result<String, LintError> {
        let warnings = self.check(ctx)?;
        Ok(crate::utils::apply_warning_fixes(ctx.content, &warnings))
    }

    /// Check if this rule should quickly skip processing based on content
    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }

    fn category(&self) -> RuleCategory;

    fn as_any(&self) -> &dyn std::any::Any;

    /// Returns the rule name and default config table if the rule has config.
    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        None
    }

    /// Factory: create a rule from config (if present), or use defaults.
    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;
}

// Implement the cloning logic for the Rule trait object
dyn_clone::clone_trait_object!(Rule);
