pub mod fix_utils;
pub mod indentation;
pub mod line_ending;

pub use fix_utils::{apply_fixes, apply_warning_fixes};
pub use indentation::expected_levels;
pub use line_ending::{LineEnding, detect_line_ending, normalize_to_lf, restore_line_ending};

/// Trait for string-related extensions
pub trait StrExt {
    /// Remove spaces and tabs at the end of every line
    fn trim_line_ends(&self) -> String;

    /// Number of leading spaces and tabs
    fn indent_len(&self) -> usize;
}

impl StrExt for str {
    fn trim_line_ends(&self) -> String {
        self.split('\n')
            .map(|line| line.trim_end_matches([' ', '\t']))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn indent_len(&self) -> usize {
        self.len() - self.trim_start_matches([' ', '\t']).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_line_ends() {
        assert_eq!("a  \n\tb\t\n".trim_line_ends(), "a\n\tb\n");
    }

    #[test]
    fn test_indent_len() {
        assert_eq!("    x".indent_len(), 4);
        assert_eq!("\t x".indent_len(), 2);
        assert_eq!("".indent_len(), 0);
    }
}
