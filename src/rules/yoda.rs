use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Disallow "Yoda" comparisons with the literal on the left. Range checks such as
/// `0 <= x && x < 10` are exempt.
#[derive(Debug, Clone, Default)]
pub struct Yoda;

impl Yoda {
    fn flipped(op: &str) -> Option<&'static str> {
        Some(match op {
            "==" => "==",
            "===" => "===",
            "!=" => "!=",
            "!==" => "!==",
            "<" => ">",
            ">" => "<",
            "<=" => ">=",
            ">=" => "<=",
            _ => return None,
        })
    }

    fn is_relational(op: &str) -> bool {
        matches!(op, "<" | ">" | "<=" | ">=")
    }

    /// Whether the token at `idx` cannot be part of an adjacent operand. Openers
    /// only delimit on the left side, on the right they start a call or index.
    fn is_boundary(ctx: &LintContext, idx: Option<usize>, openers: bool) -> bool {
        idx.is_none_or(|i| {
            let token = &ctx.tokens[i];
            (openers && token.is_opener())
                || token.is_closer()
                || (token.kind == TokenKind::Punctuator
                    && matches!(token.text, ";" | "," | "&&" | "||" | "??" | "?" | ":" | "=" | "!"))
                || token.is_any_keyword(&["return", "case", "typeof", "void"])
        })
    }

    /// End of a simple right operand: an identifier followed by `.name` accesses
    fn simple_operand_end(ctx: &LintContext, start: usize) -> Option<usize> {
        let first = &ctx.tokens[start];
        if !matches!(first.kind, TokenKind::Identifier) && !first.is_keyword("this") {
            return None;
        }
        let mut end = start;
        while let Some(dot) = ctx.next_sig(end).filter(|&d| ctx.tokens[d].is_punct(".")) {
            let name = ctx.next_sig(dot).filter(|&n| ctx.tokens[n].kind == TokenKind::Identifier)?;
            end = name;
        }
        Self::is_boundary(ctx, ctx.next_sig(end), false).then_some(end)
    }

    fn in_range_check(ctx: &LintContext, left: usize, right_end: usize) -> bool {
        let logical = |idx: Option<usize>| idx.is_some_and(|i| ctx.tokens[i].is_punct("&&") || ctx.tokens[i].is_punct("||"));
        logical(ctx.prev_sig(left)) || logical(ctx.next_sig(right_end))
    }
}

impl Rule for Yoda {
    fn name(&self) -> &'static str {
        "yoda"
    }

    fn description(&self) -> &'static str {
        "Literals belong on the right side of comparisons"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &op in ctx.significant() {
            let op_token = &ctx.tokens[op];
            if op_token.kind != TokenKind::Punctuator {
                continue;
            }
            let Some(flipped) = Self::flipped(op_token.text) else {
                continue;
            };
            let (Some(left), Some(right)) = (ctx.prev_sig(op), ctx.next_sig(op)) else {
                continue;
            };
            let left_token = &ctx.tokens[left];
            if !left_token.is_literal() || ctx.tokens[right].is_literal() {
                continue;
            }
            // The literal must be the whole left operand
            if !Self::is_boundary(ctx, ctx.prev_sig(left), true) {
                continue;
            }
            let right_end = Self::simple_operand_end(ctx, right);
            if Self::is_relational(op_token.text) && Self::in_range_check(ctx, left, right_end.unwrap_or(right)) {
                continue;
            }

            let fix = right_end
                .filter(|&end| ctx.gap_is_blank(left, op) && ctx.gap_is_blank(op, right) && ctx.gap_is_blank(right, end))
                .map(|end| {
                    let right_text = &ctx.content[ctx.tokens[right].start..ctx.tokens[end].end];
                    let replacement = format!(
                        "{right_text}{}{flipped}{}{}",
                        ctx.gap(left, op),
                        ctx.gap(op, right),
                        left_token.text
                    );
                    Fix::replace(left_token.start..ctx.tokens[end].end, replacement)
                });
            warnings.push(LintWarning::at_token(
                self.name(),
                op_token,
                format!("Expected literal to be on the right side of {}.", op_token.text),
                fix,
            ));
        }

        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Operators
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(Yoda)
    }
}
