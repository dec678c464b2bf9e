use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const UNFORMATTED: &str = "<p>Example</p>\n<pre><code>var x = \"y\";</code></pre>\n";
const FORMATTED: &str = "<p>Example</p>\n<pre><code>var x = 'y';</code></pre>\n";
const BROKEN: &str = "<pre><code>foo\n(a);</code></pre>\n";

#[test]
fn test_snippet_from_stdin() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path())
        .args(["snippet", "--no-color"])
        .write_stdin("var callback = function (){\n    ...\n}");

    cmd.assert()
        .success()
        .stdout("var callback = function () {\n    // ...\n}\n");
}

#[test]
fn test_snippet_failure_shows_flagged_line() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path())
        .args(["snippet", "--no-color"])
        .write_stdin("foo\n(a);");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("<stdin>:2:"))
        .stdout(predicate::str::contains("[func-call-spacing]"))
        .stdout(predicate::str::contains("> "));
}

#[test]
fn test_fmt_rewrites_documents() {
    let temp_dir = tempdir().unwrap();
    let page = temp_dir.path().join("page.html");
    fs::write(&page, UNFORMATTED).unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).args(["fmt", ".", "--no-color"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Reformatted page.html"));

    assert_eq!(fs::read_to_string(&page).unwrap(), FORMATTED);
}

#[test]
fn test_fmt_check_leaves_files_alone() {
    let temp_dir = tempdir().unwrap();
    let page = temp_dir.path().join("page.html");
    fs::write(&page, UNFORMATTED).unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).args(["fmt", "--check", "--no-color", "page.html"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Would reformat page.html"));

    assert_eq!(fs::read_to_string(&page).unwrap(), UNFORMATTED);
}

#[test]
fn test_fmt_check_passes_on_formatted_documents() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("page.html"), FORMATTED).unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).args(["fmt", "--check", "--no-color", "."]);
    cmd.assert().success();
}

#[test]
fn test_fmt_failure_keeps_document() {
    let temp_dir = tempdir().unwrap();
    let page = temp_dir.path().join("broken.html");
    fs::write(&page, BROKEN).unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).args(["fmt", "--no-color", "broken.html"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("broken.html:2:"))
        .stdout(predicate::str::contains("1 with unresolved problems"));

    assert_eq!(fs::read_to_string(&page).unwrap(), BROKEN);
}

#[test]
fn test_fmt_json_output() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("broken.html"), BROKEN).unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path())
        .args(["fmt", "--output-format", "json", "broken.html"]);
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let objects: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(objects.len(), 2, "unexpected output: {stdout}");
    assert_eq!(objects[0]["file"], "broken.html");
    assert_eq!(objects[0]["diagnostics"][0]["rule"], "func-call-spacing");
    assert_eq!(objects[1]["summary"]["files_failed"], 1);
}

#[test]
fn test_fmt_stdin() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path())
        .args(["fmt", "-"])
        .write_stdin(UNFORMATTED);
    cmd.assert().success().stdout(FORMATTED);
}

#[test]
fn test_rules_lists_both_phases() {
    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.args(["rules", "--no-color"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("brace-style"))
        .stdout(predicate::str::contains("capitalized-comments"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).arg("init");
    cmd.assert().success();
    assert!(temp_dir.path().join(".snipfmt.toml").exists());

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).arg("init");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_selects_code_class() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".snipfmt.toml"), "[global]\ncode-class = \"js\"\n").unwrap();
    let page = temp_dir.path().join("page.html");
    fs::write(&page, UNFORMATTED).unwrap();

    let mut cmd = cargo_bin_cmd!("snipfmt");
    cmd.current_dir(temp_dir.path()).args(["fmt", "--check", "page.html"]);
    cmd.assert().success();
}
