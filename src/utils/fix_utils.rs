//! Utilities for applying fixes in a single ordered pass
//!
//! All text rewriting in the crate goes through [`apply_fixes`]: rules, the
//! placeholder protector and the document layer each produce a list of
//! `(range, replacement)` edits against the original text instead of mutating it
//! while scanning.

use crate::rule::{Fix, LintWarning};

/// Apply edits left to right. Edits are sorted by start offset (stable, so edits at
/// the same position keep their input order); an edit that starts inside a range
/// already replaced is skipped.
pub fn apply_fixes(content: &str, fixes: impl IntoIterator<Item = Fix>) -> String {
    let mut fixes: Vec<Fix> = fixes.into_iter().collect();
    fixes.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(a.range.end.cmp(&b.range.end))
    });

    let mut result = String::with_capacity(content.len());
    let mut cursor = 0;
    for fix in fixes {
        if fix.range.start < cursor || fix.range.end > content.len() || fix.range.start > fix.range.end {
            continue;
        }
        result.push_str(&content[cursor..fix.range.start]);
        result.push_str(&fix.replacement);
        cursor = fix.range.end;
    }
    result.push_str(&content[cursor..]);
    result
}

/// Apply the fixes attached to a set of warnings
pub fn apply_warning_fixes(content: &str, warnings: &[LintWarning]) -> String {
    apply_fixes(content, warnings.iter().filter_map(|w| w.fix.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(start: usize, end: usize, replacement: &str) -> Fix {
        Fix {
            range: start..end,
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_apply_in_order() {
        let result = apply_fixes("abcdef", vec![fix(4, 5, "E"), fix(0, 1, "A")]);
        assert_eq!(result, "AbcdEf");
    }

    #[test]
    fn test_overlapping_fix_skipped() {
        let result = apply_fixes("abcdef", vec![fix(1, 4, "X"), fix(2, 3, "Y")]);
        assert_eq!(result, "aXef");
    }

    #[test]
    fn test_insertions_at_same_offset_keep_order() {
        let result = apply_fixes("ab", vec![fix(1, 1, "1"), fix(1, 1, "2")]);
        assert_eq!(result, "a12b");
    }

    #[test]
    fn test_insertion_before_replacement() {
        let result = apply_fixes("ab", vec![fix(1, 2, "B"), fix(1, 1, "-")]);
        assert_eq!(result, "a-B");
    }

    #[test]
    fn test_no_fixes() {
        assert_eq!(apply_fixes("abc", Vec::new()), "abc");
    }
}
