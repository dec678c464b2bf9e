use pretty_assertions::assert_eq;
use snipfmt_lib::config::Config;
use snipfmt_lib::error::FormatError;
use snipfmt_lib::snippet::SnippetFormatter;
use snipfmt_lib::format_snippet;

fn format(src: &str) -> String {
    format_snippet(src).unwrap()
}

#[test]
fn test_comment_scenarios() {
    assert_eq!(format("//ABC"), "// ABC");
    assert_eq!(format("// abc"), "// Abc");
    assert_eq!(format("// validate()"), "// validate()");
}

#[test]
fn test_string_ellipsis_scenario() {
    assert_eq!(format("doSomething(\"...\")"), "doSomething('...')");
}

#[test]
fn test_callback_scenario() {
    let input = "var callback = function (){\n    ...\n}";
    assert_eq!(format(input), "var callback = function () {\n    // ...\n}");
}

#[test]
fn test_encoding_scenario() {
    assert_eq!(format("if (a < 0)"), "if (a &lt; 0)");
}

#[test]
fn test_only_angle_brackets_encoded() {
    assert_eq!(format("var ok = a > b && c !== \"x\";"), "var ok = a &gt; b && c !== 'x';");
}

#[test]
fn test_tutorial_snippet() {
    let input = "\
function load(){
if(a==null){
return;
}
else{
render(a)
}
}";
    let expected = "\
function load () {
    if (a == null) {
        return;
    }
    render(a)
}";
    assert_eq!(format(input), expected);
}

#[test]
fn test_formatted_snippets_are_stable() {
    let corpus = [
        "var callback = function (){\n    ...\n}",
        "foo(...);\nbar({...});",
        "// explain()\nvar o = {...};",
        "if(a){\nb()\n}\nelse{\nc()\n}",
        "function load(){\nreturn 1\n}",
    ];
    for input in corpus {
        let once = format(input);
        assert_eq!(format(&once), once, "not stable: {input:?}");
    }
}

#[test]
fn test_clean_snippets_format_to_themselves() {
    let corpus = [
        // string concatenation across lines
        "var s = 'hello ' +\n    name;",
        "function greet (name) {\n    return 'Hello, ' +\n        name +\n        '!';\n}",
        // promise chain
        "fetch(url)\n    .then(function (response) {\n        return response.json();\n    })\n    .catch(function (e) {\n        log(e);\n    });",
        // members named like keywords
        "cache.delete(key);\npromise.catch(handle);\nvar value = mod.default;",
        "var o = {\n    default: 1,\n    delete: true\n};",
        // switch
        "switch (action) {\n    case 'add':\n        total += 1;\n        break;\n    default:\n        total = 0;\n}",
        // try/catch
        "try {\n    run();\n} catch (e) {\n    log(e);\n} finally {\n    done();\n}",
        // arrow functions, with `>` entity-encoded as it is inside a document
        "const double = (x) =&gt; x * 2;\nitems.forEach((item) =&gt; {\n    show(item);\n});",
        // condition wrapped after an operator
        "if (a &&\n    b) {\n    c();\n}",
    ];
    for input in corpus {
        assert_eq!(format(input), input, "clean snippet changed: {input:?}");
    }
}

#[test]
fn test_keyword_named_member_calls() {
    let input = "promise.catch(function (e) {\n    log(e);\n});";
    assert_eq!(format(input), input);
    assert_eq!(format("cache.delete (key);"), "cache.delete(key);");
}

#[test]
fn test_braceless_body_wrapped_in_one_pass() {
    assert_eq!(format("if (a)\n    b();"), "if (a) {\n    b();\n}");
    assert_eq!(format("if (a)\nb();"), "if (a) {\n    b();\n}");
}

#[test]
fn test_failure_reports_every_diagnostic() {
    let formatter = SnippetFormatter::from_config(&Config::default());
    let err = formatter.format("foo\n(a);\nbar\n(b);").unwrap_err();
    let FormatError::Lint(failure) = err else {
        panic!("expected a lint failure, got {err:?}");
    };
    let lines: Vec<usize> = failure.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 4]);
    assert_eq!(failure.diagnostics[1].source, "(b);");
    assert_eq!(failure.original, "foo\n(a);\nbar\n(b);");
}

#[test]
fn test_unparseable_snippet_fails() {
    let err = format_snippet("foo(a, ...);").unwrap_err();
    let FormatError::Lint(failure) = err else {
        panic!("expected a lint failure, got {err:?}");
    };
    assert_eq!(failure.diagnostics[0].rule, "syntax");
}
