use crate::lexer::TokenKind;
use crate::lint_context::{BraceKind, LintContext};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rule_config_serde::load_rule_config;
use crate::rules::indent::IndentConfig;
use crate::rules::js_utils::statement_end;

/// Collapse `else { if (..) {} }` into `else if (..) {}`
#[derive(Debug, Clone)]
pub struct NoLonelyIf {
    indent_width: usize,
}

impl Default for NoLonelyIf {
    fn default() -> Self {
        Self::new(IndentConfig::default().width)
    }
}

impl NoLonelyIf {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Remove one indentation level from every line after the first
    fn dedent(&self, text: &str) -> String {
        let mut lines = text.split('\n');
        let mut out = lines.next().unwrap_or("").to_string();
        for line in lines {
            let spaces = line.bytes().take(self.indent_width).take_while(|&b| b == b' ').count();
            out.push('\n');
            out.push_str(&line[spaces..]);
        }
        out
    }
}

impl Rule for NoLonelyIf {
    fn name(&self) -> &'static str {
        "no-lonely-if"
    }

    fn description(&self) -> &'static str {
        "An if alone in an else block becomes an else-if"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            if !ctx.tokens[idx].is_keyword("else") {
                continue;
            }
            let Some(open) = ctx
                .next_sig(idx)
                .filter(|&o| ctx.tokens[o].is_punct("{") && ctx.brace_kind(o) == Some(BraceKind::Block))
            else {
                continue;
            };
            let Some(close) = ctx.matching(open) else {
                continue;
            };
            let Some(first) = ctx.next_sig(open).filter(|&f| ctx.tokens[f].is_keyword("if")) else {
                continue;
            };
            let Some(end) = statement_end(ctx, first) else {
                continue;
            };
            if ctx.next_sig(end) != Some(close) {
                continue;
            }

            let fix = (ctx.gap_is_blank(open, first) && ctx.gap_is_blank(end, close)).then(|| {
                let if_text = &ctx.content[ctx.tokens[first].start..ctx.tokens[end].end];
                let spans_lines = ctx.tokens[first..=end]
                    .iter()
                    .any(|t| matches!(t.kind, TokenKind::Template | TokenKind::BlockComment) && t.end_line > t.line);
                let replacement = if spans_lines {
                    if_text.to_string()
                } else {
                    self.dedent(if_text)
                };
                Fix::replace(ctx.tokens[open].start..ctx.tokens[close].end, replacement)
            });
            warnings.push(LintWarning::at_token(
                self.name(),
                &ctx.tokens[first],
                "Unexpected if as the only statement in an else block.",
                fix,
            ));
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::ControlFlow
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(NoLonelyIf::new(load_rule_config::<IndentConfig>(config).width))
    }
}
