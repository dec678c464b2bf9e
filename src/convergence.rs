//!
//! Fixed-point driver for whole-document formatting. A document is formatted
//! again and again until a pass leaves the text unchanged, or the pass budget is
//! exhausted.

use crate::error::FormatError;

/// Default upper bound on whole-document passes
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Documents needing more passes than this are worth a look
pub const SLOW_CONVERGENCE_THRESHOLD: usize = 5;

/// Apply `pass` until its output equals its input.
///
/// Returns the stable text and the number of passes that were run, including the
/// final one that changed nothing. The first error aborts the loop.
pub fn converge<F>(input: &str, max_iterations: usize, mut pass: F) -> Result<(String, usize), FormatError>
where
    F: FnMut(&str) -> Result<String, FormatError>,
{
    let mut current = input.to_string();
    for iteration in 1..=max_iterations {
        let next = pass(&current)?;
        if next == current {
            log::debug!("Converged after {iteration} pass(es)");
            if iteration > SLOW_CONVERGENCE_THRESHOLD {
                log::warn!("Document needed {iteration} format passes to stabilize");
            }
            return Ok((current, iteration));
        }
        log::debug!("Format pass {iteration} changed the document");
        current = next;
    }
    Err(FormatError::NotConverged {
        iterations: max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_input_takes_one_pass() {
        let (text, passes) = converge("abc", 10, |s| Ok(s.to_string())).unwrap();
        assert_eq!(text, "abc");
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_runs_until_fixed_point() {
        // Drops one trailing `!` per pass
        let (text, passes) = converge("a!!!", 10, |s| Ok(s.strip_suffix('!').unwrap_or(s).to_string())).unwrap();
        assert_eq!(text, "a");
        assert_eq!(passes, 4);
    }

    #[test]
    fn test_cap_exceeded() {
        let result = converge("", 3, |s| Ok(format!("{s}x")));
        assert_eq!(result, Err(FormatError::NotConverged { iterations: 3 }));
    }

    #[test]
    fn test_first_error_aborts() {
        let mut calls = 0;
        let result = converge("a", 10, |_| {
            calls += 1;
            Err(FormatError::Engine("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_budget_never_converges() {
        assert_eq!(
            converge("a", 0, |s| Ok(s.to_string())),
            Err(FormatError::NotConverged { iterations: 0 })
        );
    }
}
