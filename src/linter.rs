//!
//! Built-in rule engine. A [`RuleSet`] is checked against a text, every fix found in
//! one pass is applied in a single ordered edit, and the passes repeat until the
//! text stops changing. Whatever is still reported afterwards is returned to the
//! caller, which decides whether it is fatal.

use crate::config::Config;
use crate::lint_context::LintContext;
use crate::rule::{LintError, LintResult, LintWarning, Rule, Severity};
use crate::utils::apply_fixes;
use std::fmt;

/// Upper bound on check-and-fix passes per [`RuleEngine::verify_and_fix`] call
pub const MAX_FIX_PASSES: usize = 10;

/// Bumped whenever a rule is added to or removed from a phase
pub const RULESET_VERSION: u32 = 1;

/// Rule name attached to the message reported for unparseable input
pub const SYNTAX_RULE: &str = "syntax";

/// An ordered, immutable collection of configured rules
#[derive(Clone)]
pub struct RuleSet {
    pub name: &'static str,
    pub version: u32,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            name,
            version: RULESET_VERSION,
            rules,
        }
    }

    /// Structural rules that normalize braces, spacing and indentation
    pub fn base(config: &Config) -> Self {
        Self::new("base", crate::rules::base_rules(config))
    }

    /// Style rules that assume base-normalized input
    pub fn tutorial(config: &Config) -> Self {
        Self::new("tutorial", crate::rules::tutorial_rules(config))
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// Result of a verify-and-fix run
#[derive(Debug, Clone, PartialEq)]
pub struct FixReport {
    /// The text after all applied fixes
    pub output: String,
    /// Violations still present in `output`, sorted by position
    pub messages: Vec<LintWarning>,
    /// Number of passes that changed the text
    pub passes: usize,
}

impl FixReport {
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|m| m.severity == Severity::Error).count()
    }
}

/// A rule-checking service capable of verifying a text and fixing what it can
pub trait RuleEngine {
    fn verify_and_fix(&self, source: &str, rules: &RuleSet) -> Result<FixReport, LintError>;
}

/// Lint a text against the given rules.
///
/// A text that does not parse yields exactly one `syntax` warning and no rule runs.
pub fn lint(content: &str, rules: &[Box<dyn Rule>]) -> LintResult {
    let ctx = LintContext::new(content);
    if let Some(err) = ctx.syntax_errors.first() {
        return Ok(vec![LintWarning {
            message: format!("Parsing error: {}", err.message),
            line: err.line,
            column: err.column,
            end_line: err.line,
            end_column: err.column,
            severity: Severity::Error,
            fix: None,
            rule_name: Some(SYNTAX_RULE),
        }]);
    }

    let mut warnings = Vec::new();
    for rule in rules {
        if rule.should_skip(&ctx) {
            continue;
        }
        match rule.check(&ctx) {
            Ok(rule_warnings) => warnings.extend(rule_warnings),
            Err(e) => {
                log::error!("Error checking rule {}: {e}", rule.name());
                return Err(e);
            }
        }
    }
    warnings.sort_by_key(|w| (w.line, w.column));
    Ok(warnings)
}

#[derive(Debug, Clone)]
pub struct Linter {
    max_passes: usize,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(MAX_FIX_PASSES)
    }
}

impl Linter {
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }
}

impl RuleEngine for Linter {
    fn verify_and_fix(&self, source: &str, rules: &RuleSet) -> Result<FixReport, LintError> {
        let mut text = source.to_string();
        let mut passes = 0;

        loop {
            let messages = lint(&text, rules.rules())?;
            let fixes: Vec<_> = messages.iter().filter_map(|m| m.fix.clone()).collect();
            if fixes.is_empty() || passes >= self.max_passes {
                return Ok(FixReport {
                    output: text,
                    messages,
                    passes,
                });
            }

            let fixed = apply_fixes(&text, fixes);
            if fixed == text {
                return Ok(FixReport {
                    output: text,
                    messages,
                    passes,
                });
            }
            passes += 1;
            log::debug!(
                "[{}] fix pass {passes}: {} fixable of {} messages",
                rules.name,
                messages.iter().filter(|m| m.fix.is_some()).count(),
                messages.len()
            );
            text = fixed;
        }
    }
}
