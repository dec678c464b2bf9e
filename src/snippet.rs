//!
//! Formatting of a single code fragment, from the entity-encoded text found in a
//! document to the entity-encoded text that goes back into it.

use crate::autofix::TwoPhaseAutofixer;
use crate::beautify::{Beautifier, JsBeautifier};
use crate::config::Config;
use crate::ellipsis::comment_ellipsis_lines;
use crate::entities;
use crate::error::FormatError;
use crate::linter::{Linter, RuleEngine};
use crate::placeholder;
use crate::utils::normalize_to_lf;

pub struct SnippetFormatter<E: RuleEngine = Linter, B: Beautifier = JsBeautifier> {
    autofixer: TwoPhaseAutofixer<E>,
    beautifier: B,
}

impl SnippetFormatter {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TwoPhaseAutofixer::from_config(config),
            JsBeautifier::new(config.beautify.clone()),
        )
    }
}

impl<E: RuleEngine, B: Beautifier> SnippetFormatter<E, B> {
    pub fn new(autofixer: TwoPhaseAutofixer<E>, beautifier: B) -> Self {
        Self { autofixer, beautifier }
    }

    pub fn autofixer(&self) -> &TwoPhaseAutofixer<E> {
        &self.autofixer
    }

    /// Format one fragment.
    ///
    /// On failure nothing is returned but the error; the fragment in the document
    /// stays as it was.
    pub fn format(&self, fragment: &str) -> Result<String, FormatError> {
        let original = normalize_to_lf(&entities::decode(fragment));
        placeholder::check_collision(&original)?;

        let text = comment_ellipsis_lines(&original);
        let text = self.beautifier.beautify(&text);
        let protected = placeholder::protect(&text);

        let fixed = self.autofixer.run(&protected, &original)?;

        let text = placeholder::unprotect(&fixed);
        let text = comment_ellipsis_lines(&text);
        Ok(entities::encode_angle_brackets(&text))
    }
}
