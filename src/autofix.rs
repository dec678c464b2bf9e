//!
//! Two-phase autofix: the base rules normalize structure and are always fixed up
//! completely before the tutorial rules see the text. Leftover base messages are
//! dropped; leftover tutorial messages fail the snippet.

use crate::config::Config;
use crate::error::{FormatError, FormatFailure};
use crate::linter::{Linter, RuleEngine, RuleSet};

#[derive(Debug, Clone)]
pub struct TwoPhaseAutofixer<E: RuleEngine = Linter> {
    engine: E,
    base: RuleSet,
    tutorial: RuleSet,
}

impl TwoPhaseAutofixer<Linter> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(Linter::default(), RuleSet::base(config), RuleSet::tutorial(config))
    }
}

impl<E: RuleEngine> TwoPhaseAutofixer<E> {
    pub fn new(engine: E, base: RuleSet, tutorial: RuleSet) -> Self {
        Self { engine, base, tutorial }
    }

    pub fn base(&self) -> &RuleSet {
        &self.base
    }

    pub fn tutorial(&self) -> &RuleSet {
        &self.tutorial
    }

    /// Fix `source` with both phases. `original` is the fragment as written and is
    /// only used to build the failure.
    pub fn run(&self, source: &str, original: &str) -> Result<String, FormatError> {
        let base = self.engine.verify_and_fix(source, &self.base)?;
        log::debug!(
            "[{}] {} pass(es), {} message(s) left",
            self.base.name,
            base.passes,
            base.messages.len()
        );

        let tutorial = self.engine.verify_and_fix(&base.output, &self.tutorial)?;
        log::debug!(
            "[{}] {} pass(es), {} message(s) left",
            self.tutorial.name,
            tutorial.passes,
            tutorial.messages.len()
        );

        if !tutorial.is_clean() {
            return Err(FormatError::Lint(FormatFailure::new(
                &tutorial.messages,
                original,
                &tutorial.output,
            )));
        }
        Ok(tutorial.output)
    }
}
