//! JSON output formatter

use crate::error::FormatError;
use crate::output::OutputFormatter;
use serde_json::{Value, json};

/// JSON formatter for machine-readable output; one object per failing file
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_error(&self, error: &FormatError, file_path: &str) -> String {
        let value: Value = match error {
            FormatError::Lint(failure) => json!({
                "file": file_path,
                "error": error.to_string(),
                "diagnostics": failure.diagnostics,
                "original": failure.original,
                "linted": failure.linted,
            }),
            other => json!({
                "file": file_path,
                "error": other.to_string(),
                "diagnostics": [],
            }),
        };
        value.to_string()
    }

    fn format_summary(&self, files_processed: usize, files_changed: usize, files_failed: usize) -> Option<String> {
        Some(
            json!({
                "summary": {
                    "files_processed": files_processed,
                    "files_changed": files_changed,
                    "files_failed": files_failed,
                }
            })
            .to_string(),
        )
    }
}
