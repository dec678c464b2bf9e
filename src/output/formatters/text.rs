//! Default text output formatter with colors and the failing fragment

use crate::error::{FormatError, FormatFailure};
use crate::output::OutputFormatter;
use colored::*;

/// Default human-readable formatter with colors
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_failure(&self, failure: &FormatFailure, file_path: &str) -> String {
        let mut output = Vec::new();

        for diagnostic in &failure.diagnostics {
            // Format: file:line:column: [rule] message
            output.push(format!(
                "{}:{}:{}: {} {}",
                self.paint(file_path, |s| s.blue().underline()),
                self.paint(&diagnostic.line.to_string(), |s| s.cyan()),
                self.paint(&diagnostic.column.to_string(), |s| s.cyan()),
                self.paint(&format!("[{}]", diagnostic.rule), |s| s.yellow()),
                diagnostic.message,
            ));
        }

        let flagged = failure.flagged_lines();
        let width = failure.original.lines().count().max(1).to_string().len();
        for (idx, line) in failure.original.split('\n').enumerate() {
            let number = idx + 1;
            if flagged.contains(&number) {
                output.push(format!(
                    "{} {number:>width$} | {}",
                    self.paint(">", |s| s.red().bold()),
                    self.paint(line, |s| s.red())
                ));
            } else {
                output.push(format!("  {number:>width$} | {line}"));
            }
        }

        output.join("\n")
    }
}

impl OutputFormatter for TextFormatter {
    fn format_error(&self, error: &FormatError, file_path: &str) -> String {
        match error {
            FormatError::Lint(failure) => self.format_failure(failure, file_path),
            other => format!(
                "{}: {} {other}",
                self.paint(file_path, |s| s.blue().underline()),
                self.paint("error:", |s| s.red().bold())
            ),
        }
    }

    fn format_summary(&self, files_processed: usize, files_changed: usize, files_failed: usize) -> Option<String> {
        let summary = format!(
            "{files_processed} file(s) processed, {files_changed} changed, {files_failed} with unresolved problems"
        );
        Some(if files_failed > 0 {
            self.paint(&summary, |s| s.red())
        } else {
            self.paint(&summary, |s| s.green())
        })
    }

    fn use_colors(&self) -> bool {
        self.use_colors
    }
}
