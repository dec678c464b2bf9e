use pretty_assertions::assert_eq;
use snipfmt_lib::config::Config;
use snipfmt_lib::document::{DocumentFormatter, DocumentTransform, Mode, NO_FRAGMENTS_WARNING};
use snipfmt_lib::error::FormatError;
use snipfmt_lib::format_document;

const PAGE: &str = "\
<h2>Callbacks</h2>
<p>Pass a function:</p>
<pre><code>var callback = function (){
    ...
}</code></pre>
<p>And compare with <code>a < b</code>:</p>
<pre><code>if(a &lt; b){
return \"less\"
}</code></pre>
";

const FORMATTED: &str = "\
<h2>Callbacks</h2>
<p>Pass a function:</p>
<pre><code>var callback = function () {
    // ...
}</code></pre>
<p>And compare with <code>a < b</code>:</p>
<pre><code>if (a &lt; b) {
    return 'less'
}</code></pre>
";

/// Wraps every `<pre>` in a figure, once
struct Figures;

impl DocumentTransform for Figures {
    fn name(&self) -> &'static str {
        "figures"
    }

    fn apply(&self, document: &str) -> Result<String, FormatError> {
        if document.contains("<figure>") {
            return Ok(document.to_string());
        }
        Ok(document.replace("<pre>", "<figure><pre>").replace("</pre>", "</pre></figure>"))
    }
}

#[test]
fn test_document_reaches_fixed_point() {
    let result = format_document(PAGE, Mode::CodeOnly).unwrap();
    assert_eq!(result.text, FORMATTED);
    assert_eq!(result.iterations, 2);
    assert!(result.changed(PAGE));
}

#[test]
fn test_formatted_document_is_stable() {
    let result = format_document(FORMATTED, Mode::CodeOnly).unwrap();
    assert_eq!(result.text, FORMATTED);
    assert_eq!(result.iterations, 1);
    assert!(!result.changed(FORMATTED));
}

#[test]
fn test_prose_only_document_warns() {
    let result = format_document("<p>Nothing to see</p>\n", Mode::All).unwrap();
    assert_eq!(result.text, "<p>Nothing to see</p>\n");
    assert_eq!(result.warnings, vec![NO_FRAGMENTS_WARNING.to_string()]);
}

#[test]
fn test_all_mode_runs_transforms_after_fragments() {
    let formatter = DocumentFormatter::default()
        .with_mode(Mode::All)
        .with_transform(Box::new(Figures));
    let result = formatter.format(PAGE).unwrap();
    let expected = FORMATTED
        .replace("<pre>", "<figure><pre>")
        .replace("</pre>", "</pre></figure>");
    assert_eq!(result.text, expected);
}

#[test]
fn test_code_class_selects_fragments() {
    let config: Config = Config::from_toml_str("[global]\ncode-class = \"js\"\n").unwrap();
    let doc = "<pre><code class=\"js\">a = \"b\";</code></pre>\n<pre><code>a = \"b\";</code></pre>";
    let result = DocumentFormatter::from_config(&config).format(doc).unwrap();
    assert_eq!(
        result.text,
        "<pre><code class=\"js\">a = 'b';</code></pre>\n<pre><code>a = \"b\";</code></pre>"
    );
}

#[test]
fn test_failing_fragment_leaves_document_untouched() {
    let doc = "<pre><code>a = \"b\";</code></pre>\n<pre><code>foo\n(a);</code></pre>";
    let err = format_document(doc, Mode::CodeOnly).unwrap_err();
    let FormatError::Lint(failure) = err else {
        panic!("expected a lint failure, got {err:?}");
    };
    assert_eq!(failure.original, "foo\n(a);");
    assert_eq!(failure.flagged_lines(), vec![2]);
}

#[test]
fn test_oscillating_transform_hits_iteration_cap() {
    struct Toggle;

    impl DocumentTransform for Toggle {
        fn name(&self) -> &'static str {
            "toggle"
        }

        fn apply(&self, document: &str) -> Result<String, FormatError> {
            Ok(match document.strip_suffix('!') {
                Some(stripped) => stripped.to_string(),
                None => format!("{document}!"),
            })
        }
    }

    let formatter = DocumentFormatter::default()
        .with_mode(Mode::All)
        .with_max_iterations(4)
        .with_transform(Box::new(Toggle));
    assert_eq!(
        formatter.format("<pre><code>a();</code></pre>"),
        Err(FormatError::NotConverged { iterations: 4 })
    );
}
