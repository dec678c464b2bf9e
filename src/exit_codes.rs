/// Exit codes for snipfmt
///
/// These exit codes allow users and CI/CD systems to tell a snippet that needs a
/// human apart from a broken invocation.
/// Success - every document is formatted
pub const SUCCESS: i32 = 0;

/// Unresolved style violations, or changes found under `--check`
pub const VIOLATIONS_FOUND: i32 = 1;

/// Tool error - Configuration error, file access error, or internal error
pub const TOOL_ERROR: i32 = 2;

/// Exit code for a finished `fmt` run
pub fn for_run(files_failed: usize, files_changed: usize, check: bool) -> i32 {
    if files_failed > 0 || (check && files_changed > 0) {
        VIOLATIONS_FOUND
    } else {
        SUCCESS
    }
}

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::TOOL_ERROR;

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }

    /// Exit with the given code
    pub fn with_code(code: i32) -> ! {
        std::process::exit(code);
    }
}
