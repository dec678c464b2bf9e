use crate::lexer::{Token, TokenKind};
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};

/// Strings use single quotes. Plain template literals (no substitutions, no tag,
/// on one line) are strings too and get converted.
#[derive(Debug, Clone, Default)]
pub struct Quotes;

impl Quotes {
    /// Re-quote a string or template literal with `'`, adjusting escapes
    fn to_single_quotes(text: &str) -> String {
        let old_quote = text.chars().next().unwrap_or('"');
        let body = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) if escaped == old_quote => out.push(escaped),
                    Some(escaped) => {
                        out.push('\\');
                        out.push(escaped);
                    }
                    None => out.push('\\'),
                },
                '\'' => out.push_str("\\'"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Whether a template literal behaves like a plain string
    fn is_plain_template(ctx: &LintContext, idx: usize, token: &Token) -> bool {
        if token.text.len() < 2 || !token.text.ends_with('`') || token.text.contains('\n') {
            return false;
        }
        let tagged = ctx.prev_sig(idx).is_some_and(|p| {
            let prev = &ctx.tokens[p];
            prev.ends_operand() || prev.is_punct(".") || prev.is_punct("?.")
        });
        if tagged {
            return false;
        }
        let mut escaped = false;
        let mut dollar = false;
        for c in token.text.chars() {
            if escaped {
                escaped = false;
                dollar = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '{' if dollar => return false,
                _ => {}
            }
            dollar = c == '$';
        }
        true
    }
}

impl Rule for Quotes {
    fn name(&self) -> &'static str {
        "quotes"
    }

    fn description(&self) -> &'static str {
        "Strings use single quotes"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &idx in ctx.significant() {
            let token = &ctx.tokens[idx];
            let convert = match token.kind {
                TokenKind::String => token.text.starts_with('"'),
                TokenKind::Template => Self::is_plain_template(ctx, idx, token),
                _ => false,
            };
            if !convert {
                continue;
            }
            warnings.push(LintWarning::at_token(
                self.name(),
                token,
                "Strings must use singlequote.",
                Some(Fix::replace(token.start..token.end, Self::to_single_quotes(token.text))),
            ));
        }

        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('"') && !ctx.content.contains('`')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Literals
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(Quotes)
    }
}
