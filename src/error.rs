//!
//! Errors raised while formatting a snippet or a document.

use crate::rule::LintWarning;
use serde::Serialize;
use thiserror::Error;

/// One violation left over after the tutorial phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: String,
    pub message: String,
    /// 1-indexed line in [`FormatFailure::linted`]
    pub line: usize,
    pub column: usize,
    /// The offending line of the linted text
    pub source: String,
}

impl Diagnostic {
    pub fn from_warning(warning: &LintWarning, linted: &str) -> Self {
        Self {
            rule: warning.rule_name.unwrap_or("unknown").to_string(),
            message: warning.message.clone(),
            line: warning.line,
            column: warning.column,
            source: linted
                .split('\n')
                .nth(warning.line.saturating_sub(1))
                .unwrap_or("")
                .to_string(),
        }
    }
}

/// A snippet that could not be brought into shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatFailure {
    pub diagnostics: Vec<Diagnostic>,
    /// The fragment as the author wrote it (entity-decoded)
    pub original: String,
    /// The text the diagnostic positions refer to
    pub linted: String,
}

impl FormatFailure {
    pub fn new(warnings: &[LintWarning], original: &str, linted: &str) -> Self {
        Self {
            diagnostics: warnings.iter().map(|w| Diagnostic::from_warning(w, linted)).collect(),
            original: original.to_string(),
            linted: linted.to_string(),
        }
    }

    /// Lines of the linted text that carry at least one diagnostic
    pub fn flagged_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self.diagnostics.iter().map(|d| d.line).collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{} unresolved style violation(s) in snippet", .0.diagnostics.len())]
    Lint(FormatFailure),

    #[error("Snippet already contains the ellipsis placeholder text (line {line})")]
    PlaceholderCollision { line: usize },

    #[error("Document did not stabilize after {iterations} format passes")]
    NotConverged { iterations: usize },

    #[error("Rule engine failed: {0}")]
    Engine(String),
}

impl From<crate::rule::LintError> for FormatError {
    fn from(err: crate::rule::LintError) -> Self {
        FormatError::Engine(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Severity;

    fn warning(line: usize, message: &str) -> LintWarning {
        LintWarning {
            message: message.to_string(),
            line,
            column: 3,
            end_line: line,
            end_column: 4,
            severity: Severity::Error,
            fix: None,
            rule_name: Some("eqeqeq"),
        }
    }

    #[test]
    fn test_diagnostic_carries_source_line() {
        let failure = FormatFailure::new(&[warning(2, "m")], "orig", "a();\nif (a == b) {}");
        assert_eq!(failure.diagnostics[0].source, "if (a == b) {}");
        assert_eq!(failure.diagnostics[0].rule, "eqeqeq");
        assert_eq!(failure.original, "orig");
    }

    #[test]
    fn test_flagged_lines_deduplicated() {
        let failure = FormatFailure::new(&[warning(3, "a"), warning(1, "b"), warning(3, "c")], "", "");
        assert_eq!(failure.flagged_lines(), vec![1, 3]);
    }

    #[test]
    fn test_error_messages() {
        let failure = FormatFailure::new(&[warning(1, "a")], "", "x");
        assert_eq!(FormatError::Lint(failure).to_string(), "1 unresolved style violation(s) in snippet");
        assert_eq!(
            FormatError::NotConverged { iterations: 10 }.to_string(),
            "Document did not stabilize after 10 format passes"
        );
    }
}
