//!
//! Pretty-printing of snippets before they reach the rule engine.
//!
//! The beautifier only touches layout: the space between keywords and their
//! parentheses, brace placement, trailing whitespace, long comma-separated lines
//! and indentation. It works on the tolerant token stream, so a snippet that does
//! not parse still comes back in a predictable shape.

use crate::lint_context::{BraceKind, LintContext};
use crate::rule::Fix;
use crate::rules::js_utils::CONTROL_KEYWORDS;
use crate::utils::{StrExt, apply_fixes, expected_levels, normalize_to_lf};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Upper bound on line-wrapping rounds; each round breaks every long line once
const MAX_WRAP_ROUNDS: usize = 16;

/// A pretty-printing service
pub trait Beautifier {
    fn beautify(&self, source: &str) -> String;
}

/// Where the opening brace of a block goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyleOption {
    /// `if (a) {` and `} else {`
    #[default]
    Collapse,
    /// Braces and `else` on their own lines
    Expand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BeautifyOptions {
    pub indent_size: usize,
    /// Lines wider than this are broken after a comma where possible
    pub wrap_line_length: usize,
    pub brace_style: BraceStyleOption,
    /// Put a space between `function` and `(` in anonymous functions
    pub jslint_happy: bool,
}

impl Default for BeautifyOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            wrap_line_length: 100,
            brace_style: BraceStyleOption::Collapse,
            jslint_happy: true,
        }
    }
}

/// Built-in JavaScript beautifier
#[derive(Debug, Clone, Default)]
pub struct JsBeautifier {
    options: BeautifyOptions,
}

impl JsBeautifier {
    pub fn new(options: BeautifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BeautifyOptions {
        &self.options
    }

    fn block_gap(&self) -> &'static str {
        match self.options.brace_style {
            BraceStyleOption::Collapse => " ",
            BraceStyleOption::Expand => "\n",
        }
    }

    /// Normalize the gap after keywords, around block braces and before `else`
    fn respace(&self, text: &str) -> String {
        let ctx = LintContext::new(text);
        let mut fixes = Vec::new();

        for &idx in ctx.significant() {
            let Some(next) = ctx.next_sig(idx) else {
                continue;
            };
            if !ctx.gap_is_blank(idx, next) {
                continue;
            }
            let token = &ctx.tokens[idx];
            let next_token = &ctx.tokens[next];

            let wanted = if next_token.is_punct("(") && token.is_keyword("function") {
                if self.options.jslint_happy { " " } else { "" }
            } else if next_token.is_punct("(") && token.is_any_keyword(CONTROL_KEYWORDS) {
                " "
            } else if next_token.is_punct("{")
                && ctx.brace_kind(next) == Some(BraceKind::Block)
                && (token.is_punct(")") || token.is_any_keyword(&["else", "try", "do", "finally"]))
            {
                self.block_gap()
            } else if token.is_punct("}") && next_token.is_any_keyword(&["else", "catch", "finally"]) {
                self.block_gap()
            } else {
                continue;
            };

            let gap = ctx.gap(idx, next);
            let satisfied = match wanted {
                "\n" => gap.contains('\n'),
                _ => gap == wanted,
            };
            if !satisfied {
                fixes.push(Fix::replace(token.end..next_token.start, wanted));
            }
        }

        apply_fixes(text, fixes)
    }

    /// Strip trailing blanks from every line whose end is outside a literal
    fn trim_trailing(&self, text: &str) -> String {
        let ctx = LintContext::new(text);
        ctx.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                if ctx.starts_inside_token(idx + 2) {
                    *line
                } else {
                    line.trim_end_matches([' ', '\t'])
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Break every over-long line once, after the last comma that still fits
    fn wrap_once(&self, text: &str) -> String {
        let ctx = LintContext::new(text);
        let limit = self.options.wrap_line_length;
        let mut fixes = Vec::new();

        for line in 1..=ctx.line_count() {
            let line_start = ctx.line_offsets[line - 1];
            if ctx.lines[line - 1].width() <= limit {
                continue;
            }
            let breaks: Vec<(usize, usize)> = ctx
                .significant()
                .iter()
                .copied()
                .filter(|&idx| ctx.tokens[idx].line == line && ctx.tokens[idx].is_punct(","))
                .filter_map(|idx| {
                    let next = ctx.next_sig(idx)?;
                    let blank = ctx.gap_is_blank(idx, next) && !ctx.gap(idx, next).contains('\n');
                    blank.then_some((idx, next))
                })
                .collect();
            let fits = |&(comma, _): &(usize, usize)| ctx.content[line_start..ctx.tokens[comma].end].width() <= limit;
            let chosen = breaks.iter().rev().find(|b| fits(b)).or_else(|| breaks.first());
            if let Some(&(comma, next)) = chosen {
                fixes.push(Fix::replace(ctx.tokens[comma].end..ctx.tokens[next].start, "\n"));
            }
        }

        apply_fixes(text, fixes)
    }

    fn wrap(&self, text: &str) -> String {
        let mut current = text.to_string();
        for _ in 0..MAX_WRAP_ROUNDS {
            let next = self.wrap_once(&current);
            if next == current {
                break;
            }
            current = self.reindent(&next);
        }
        current
    }

    /// Replace the indentation of every line with its structural level
    fn reindent(&self, text: &str) -> String {
        let ctx = LintContext::new(text);
        let levels = expected_levels(&ctx, 1);
        ctx.lines
            .iter()
            .zip(levels)
            .map(|(line, level)| match level {
                Some(level) => {
                    let body = &line[line.indent_len()..];
                    format!("{}{body}", " ".repeat(level * self.options.indent_size))
                }
                None => (*line).to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Beautifier for JsBeautifier {
    fn beautify(&self, source: &str) -> String {
        let text = normalize_to_lf(source);
        let text = self.respace(&text);
        let text = self.trim_trailing(&text);
        let text = self.reindent(&text);
        let text = self.wrap(&text);
        text.trim_start_matches('\n').trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn beautify(src: &str) -> String {
        JsBeautifier::default().beautify(src)
    }

    #[test]
    fn test_function_and_brace_spacing() {
        assert_eq!(
            beautify("var callback = function(){\n// ...\n}"),
            "var callback = function () {\n    // ...\n}"
        );
    }

    #[test]
    fn test_control_flow_collapsed() {
        assert_eq!(
            beautify("if(a){\nb();\n}\nelse{\nc();\n}"),
            "if (a) {\n    b();\n} else {\n    c();\n}"
        );
    }

    #[test]
    fn test_expand_brace_style() {
        let beautifier = JsBeautifier::new(BeautifyOptions {
            brace_style: BraceStyleOption::Expand,
            ..BeautifyOptions::default()
        });
        assert_eq!(
            beautifier.beautify("if (a) {\nb();\n} else {\nc();\n}"),
            "if (a)\n{\n    b();\n}\nelse\n{\n    c();\n}"
        );
    }

    #[test]
    fn test_no_jslint_happy() {
        let beautifier = JsBeautifier::new(BeautifyOptions {
            jslint_happy: false,
            ..BeautifyOptions::default()
        });
        assert_eq!(beautifier.beautify("f(function () {});"), "f(function() {});");
    }

    #[test]
    fn test_wraps_after_last_fitting_comma() {
        let beautifier = JsBeautifier::new(BeautifyOptions {
            wrap_line_length: 20,
            ..BeautifyOptions::default()
        });
        assert_eq!(
            beautifier.beautify("foo(aaaaaa, bbbbbb, cccccc);"),
            "foo(aaaaaa, bbbbbb,\n    cccccc);"
        );
    }

    #[test]
    fn test_surrounding_blank_space_stripped() {
        assert_eq!(beautify("\n\n  a();  \n\n"), "a();");
        assert_eq!(beautify("a();\r\nb();\r\n"), "a();\nb();");
    }

    #[test]
    fn test_literal_content_untouched() {
        let src = "var t = `a  \n   b`;";
        assert_eq!(beautify(src), src);
    }

    #[test]
    fn test_invalid_input_tolerated() {
        assert_eq!(beautify("foo(...);\n"), "foo(...);");
        assert_eq!(beautify("if (a) {\nb(;"), "if (a) {\n    b(;");
    }

    #[test]
    fn test_operator_continuation_kept() {
        let src = "var s = 'hello ' +\n    name;";
        assert_eq!(beautify(src), src);
        assert_eq!(beautify("var s = 'hello ' +\nname;"), src);
    }

    #[test]
    fn test_braceless_body_indented() {
        assert_eq!(beautify("if (a)\n    b();"), "if (a)\n    b();");
        assert_eq!(beautify("if(a)\nb();"), "if (a)\n    b();");
    }

    #[test]
    fn test_keyword_named_members_not_spaced() {
        assert_eq!(beautify("promise.catch(handle);"), "promise.catch(handle);");
        assert_eq!(beautify("cache.delete(key);"), "cache.delete(key);");
    }

    #[test]
    fn test_idempotent() {
        let once = beautify("function a(){\nif(b){\nreturn {x: 1};\n}\n}");
        assert_eq!(once, "function a() {\n    if (b) {\n        return {x: 1};\n    }\n}");
        assert_eq!(beautify(&once), once);
    }
}
