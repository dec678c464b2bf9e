//!
//! Document-level formatting: find the code fragments of a document, format each
//! of them, run the optional document transforms and repeat the whole thing until
//! the document stops changing.

use crate::config::Config;
use crate::convergence::{DEFAULT_MAX_ITERATIONS, converge};
use crate::error::FormatError;
use crate::rule::Fix;
use crate::snippet::SnippetFormatter;
use crate::utils::{apply_fixes, restore_line_ending};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

/// Advisory emitted when a document holds nothing to format
pub const NO_FRAGMENTS_WARNING: &str = "No code fragments matched the expected selector";

static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre(?:\s[^>]*)?>\s*<code(\s[^>]*)?>(.*?)</code>\s*</pre>").unwrap());
static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap());

/// Which transforms a document-level format runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Code fragments only
    #[default]
    CodeOnly,
    /// Code fragments and every registered [`DocumentTransform`]
    All,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "code-only" | "code" => Ok(Mode::CodeOnly),
            "all" => Ok(Mode::All),
            _ => Err(format!("Unknown mode: {s}")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::CodeOnly => write!(f, "code-only"),
            Mode::All => write!(f, "all"),
        }
    }
}

/// Locates the code fragments of a document
pub trait FragmentExtractor: Send + Sync {
    /// Byte ranges of fragment text, ordered and non-overlapping
    fn extract(&self, document: &str) -> Vec<Range<usize>>;
}

/// Finds the content of `<pre><code>` blocks, optionally only those whose
/// `<code>` carries a given class.
#[derive(Debug, Clone, Default)]
pub struct HtmlCodeExtractor {
    class: Option<String>,
}

impl HtmlCodeExtractor {
    pub fn new(class: Option<String>) -> Self {
        Self { class }
    }

    fn has_class(&self, attrs: &str) -> bool {
        let Some(wanted) = &self.class else {
            return true;
        };
        CLASS_ATTR.captures_iter(attrs).any(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .is_some_and(|value| value.as_str().split_whitespace().any(|c| c == wanted))
        })
    }
}

impl FragmentExtractor for HtmlCodeExtractor {
    fn extract(&self, document: &str) -> Vec<Range<usize>> {
        CODE_BLOCK
            .captures_iter(document)
            .filter(|caps| self.has_class(caps.get(1).map_or("", |m| m.as_str())))
            .filter_map(|caps| caps.get(2).map(|m| m.range()))
            .collect()
    }
}

/// A document rewrite that runs after the code fragments are formatted, in
/// [`Mode::All`] only
pub trait DocumentTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, document: &str) -> Result<String, FormatError>;
}

/// Output of a single document pass
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPass {
    pub text: String,
    pub warnings: Vec<String>,
}

/// A document brought to its fixed point
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDocument {
    pub text: String,
    /// Passes run, including the last one that changed nothing
    pub iterations: usize,
    /// Advisory warnings collected over all passes, deduplicated
    pub warnings: Vec<String>,
}

impl FormattedDocument {
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

pub struct DocumentFormatter {
    snippets: SnippetFormatter,
    extractor: Box<dyn FragmentExtractor>,
    transforms: Vec<Box<dyn DocumentTransform>>,
    mode: Mode,
    max_iterations: usize,
}

impl Default for DocumentFormatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DocumentFormatter {
    pub fn new(snippets: SnippetFormatter, extractor: Box<dyn FragmentExtractor>) -> Self {
        Self {
            snippets,
            extractor,
            transforms: Vec::new(),
            mode: Mode::CodeOnly,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SnippetFormatter::from_config(config),
            Box::new(HtmlCodeExtractor::new(config.global.code_class.clone())),
        )
        .with_mode(config.global.mode)
        .with_max_iterations(config.global.max_iterations)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_transform(mut self, transform: Box<dyn DocumentTransform>) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Format every fragment once and, in [`Mode::All`], run the transforms.
    ///
    /// The first fragment that fails aborts the pass; nothing is partially applied.
    pub fn format_once(&self, text: &str) -> Result<DocumentPass, FormatError> {
        let spans = self.extractor.extract(text);
        let mut warnings = Vec::new();
        if spans.is_empty() {
            warnings.push(NO_FRAGMENTS_WARNING.to_string());
        }

        let mut fixes = Vec::with_capacity(spans.len());
        for span in spans {
            let fragment = &text[span.clone()];
            let formatted = self.snippets.format(fragment)?;
            if formatted != fragment {
                fixes.push(Fix::replace(span, formatted));
            }
        }
        let mut output = restore_line_ending(text, &apply_fixes(text, fixes));

        if self.mode == Mode::All {
            for transform in &self.transforms {
                log::debug!("Running document transform {}", transform.name());
                output = transform.apply(&output)?;
            }
        }

        Ok(DocumentPass { text: output, warnings })
    }

    /// Format until the document reaches a fixed point
    pub fn format(&self, text: &str) -> Result<FormattedDocument, FormatError> {
        let mut warnings: Vec<String> = Vec::new();
        let (text, iterations) = converge(text, self.max_iterations, |current| {
            let pass = self.format_once(current)?;
            for warning in pass.warnings {
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
            Ok(pass.text)
        })?;
        Ok(FormattedDocument {
            text,
            iterations,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Appends a footer once
    struct Footer;

    impl DocumentTransform for Footer {
        fn name(&self) -> &'static str {
            "footer"
        }

        fn apply(&self, document: &str) -> Result<String, FormatError> {
            if document.ends_with("<footer></footer>") {
                Ok(document.to_string())
            } else {
                Ok(format!("{document}<footer></footer>"))
            }
        }
    }

    #[test]
    fn test_extract_code_blocks() {
        let doc = "<p>x</p><pre><code>a();</code></pre>\n<pre class=\"x\">\n<code class=\"js\">b();</code>\n</pre>";
        let spans = HtmlCodeExtractor::default().extract(doc);
        let fragments: Vec<&str> = spans.iter().map(|s| &doc[s.clone()]).collect();
        assert_eq!(fragments, vec!["a();", "b();"]);
    }

    #[test]
    fn test_class_filter() {
        let doc = "<pre><code class=\"lang-js javascript\">a();</code></pre><pre><code>b();</code></pre>";
        let extractor = HtmlCodeExtractor::new(Some("javascript".to_string()));
        let spans = extractor.extract(doc);
        assert_eq!(spans.len(), 1);
        assert_eq!(&doc[spans[0].clone()], "a();");
    }

    #[test]
    fn test_inline_code_ignored() {
        let spans = HtmlCodeExtractor::default().extract("<p>Call <code>a()</code> first.</p>");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_formats_every_fragment() {
        let doc = "<h1>T</h1>\n<pre><code>//abc\nif (a &lt; 0) {\nb();\n}</code></pre>\n<pre><code>x = \"y\";</code></pre>";
        let result = DocumentFormatter::default().format(doc).unwrap();
        assert_eq!(
            result.text,
            "<h1>T</h1>\n<pre><code>// Abc\nif (a &lt; 0) {\n    b();\n}</code></pre>\n<pre><code>x = 'y';</code></pre>"
        );
        assert_eq!(result.iterations, 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_no_fragments_warning() {
        let result = DocumentFormatter::default().format("<p>prose</p>").unwrap();
        assert_eq!(result.text, "<p>prose</p>");
        assert_eq!(result.iterations, 1);
        assert_eq!(result.warnings, vec![NO_FRAGMENTS_WARNING.to_string()]);
    }

    #[test]
    fn test_failure_aborts_document() {
        let doc = "<pre><code>a = \"b\";</code></pre><pre><code>foo\n(a);</code></pre>";
        let err = DocumentFormatter::default().format(doc).unwrap_err();
        assert!(matches!(err, FormatError::Lint(_)));
    }

    #[test]
    fn test_transforms_run_in_all_mode_only() {
        let doc = "<pre><code>a();</code></pre>";

        let code_only = DocumentFormatter::default().with_transform(Box::new(Footer));
        assert_eq!(code_only.format(doc).unwrap().text, doc);

        let all = DocumentFormatter::default()
            .with_mode(Mode::All)
            .with_transform(Box::new(Footer));
        let result = all.format(doc).unwrap();
        assert_eq!(result.text, "<pre><code>a();</code></pre><footer></footer>");
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn test_crlf_documents_keep_crlf() {
        let doc = "<p>x</p>\r\n<pre><code>if (a) {\r\nb();\r\n}</code></pre>\r\n";
        let result = DocumentFormatter::default().format(doc).unwrap();
        assert_eq!(result.text, "<p>x</p>\r\n<pre><code>if (a) {\r\n    b();\r\n}</code></pre>\r\n");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("all".parse::<Mode>(), Ok(Mode::All));
        assert_eq!("code-only".parse::<Mode>(), Ok(Mode::CodeOnly));
        assert!("everything".parse::<Mode>().is_err());
        assert_eq!(Mode::CodeOnly.to_string(), "code-only");
    }
}
