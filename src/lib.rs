pub mod autofix;
pub mod beautify;
pub mod cli_types;
pub mod config;
pub mod convergence;
pub mod document;
pub mod ellipsis;
pub mod entities;
pub mod error;
pub mod exit_codes;
pub mod file_processor;
pub mod lexer;
pub mod lint_context;
pub mod linter;
pub mod output;
pub mod placeholder;
pub mod rule;
pub mod rule_config_serde;
pub mod rules;
pub mod snippet;
pub mod utils;

pub use crate::autofix::TwoPhaseAutofixer;
pub use crate::beautify::{Beautifier, BeautifyOptions, JsBeautifier};
pub use crate::config::Config;
pub use crate::document::{DocumentFormatter, FormattedDocument, Mode};
pub use crate::error::{Diagnostic, FormatError, FormatFailure};
pub use crate::lint_context::LintContext;
pub use crate::linter::{Linter, RuleEngine, RuleSet};
pub use crate::snippet::SnippetFormatter;

/// Format one snippet with the default configuration
pub fn format_snippet(fragment: &str) -> Result<String, FormatError> {
    SnippetFormatter::from_config(&Config::default()).format(fragment)
}

/// Format a whole document with the default configuration until it stops changing
pub fn format_document(document: &str, mode: Mode) -> Result<FormattedDocument, FormatError> {
    DocumentFormatter::from_config(&Config::default())
        .with_mode(mode)
        .format(document)
}
