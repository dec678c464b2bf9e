use crate::lexer::TokenKind;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use crate::rule_config_serde::{config_section, load_rule_config};
use crate::rules::indent::IndentConfig;
use crate::rules::js_utils::is_call_paren;

mod newline_per_chained_call_config;
pub use newline_per_chained_call_config::NewlinePerChainedCallConfig;

/// Break call chains so that each call after the first sits on its own line:
///
/// ```text
/// $('p')
///     .css('color', 'red')
///     .hide();
/// ```
#[derive(Debug, Clone)]
pub struct NewlinePerChainedCall {
    config: NewlinePerChainedCallConfig,
    indent_width: usize,
}

impl Default for NewlinePerChainedCall {
    fn default() -> Self {
        Self::from_config_struct(NewlinePerChainedCallConfig::default(), IndentConfig::default().width)
    }
}

/// `obj.prop(` as token indices
struct MemberCall {
    object_end: usize,
    dot: usize,
    property: usize,
}

impl NewlinePerChainedCall {
    pub fn new(ignore_chain_with_depth: usize) -> Self {
        Self::from_config_struct(
            NewlinePerChainedCallConfig {
                ignore_chain_with_depth,
            },
            IndentConfig::default().width,
        )
    }

    pub fn from_config_struct(config: NewlinePerChainedCallConfig, indent_width: usize) -> Self {
        Self { config, indent_width }
    }

    /// The member expression called by the `(` at `paren`, if the callee is one
    fn member_call(ctx: &LintContext, paren: usize) -> Option<MemberCall> {
        if !is_call_paren(ctx, paren) {
            return None;
        }
        let property = ctx.prev_sig(paren).filter(|&p| ctx.tokens[p].kind == TokenKind::Identifier)?;
        let dot = ctx
            .prev_sig(property)
            .filter(|&d| ctx.tokens[d].is_punct(".") || ctx.tokens[d].is_punct("?."))?;
        Some(MemberCall {
            object_end: ctx.prev_sig(dot)?,
            dot,
            property,
        })
    }

    /// Number of calls in the chain ending with `call`
    fn chain_depth(ctx: &LintContext, call: &MemberCall) -> usize {
        let mut depth = 1;
        let mut object_end = call.object_end;
        while ctx.tokens[object_end].is_punct(")") {
            let Some(open) = ctx.matching(object_end).filter(|&open| is_call_paren(ctx, open)) else {
                break;
            };
            depth += 1;
            match Self::member_call(ctx, open) {
                Some(inner) => object_end = inner.object_end,
                None => break,
            }
        }
        depth
    }

    fn line_break(&self, ctx: &LintContext, line: usize) -> String {
        let indent = ctx.indentation(line);
        let continues_chain = ctx
            .first_token_on_line(line)
            .is_some_and(|first| ctx.tokens[first].is_punct(".") || ctx.tokens[first].is_punct("?."));
        if continues_chain {
            format!("\n{indent}")
        } else {
            format!("\n{indent}{}", " ".repeat(self.indent_width))
        }
    }
}

impl Rule for NewlinePerChainedCall {
    fn name(&self) -> &'static str {
        "newline-per-chained-call"
    }

    fn description(&self) -> &'static str {
        "Chained calls are broken onto separate lines"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for &paren in ctx.significant() {
            let Some(call) = Self::member_call(ctx, paren) else {
                continue;
            };
            if Self::chain_depth(ctx, &call) <= self.config.ignore_chain_with_depth {
                continue;
            }
            let object_end = &ctx.tokens[call.object_end];
            let property = &ctx.tokens[call.property];
            if object_end.end_line != property.line {
                continue;
            }

            let dot = &ctx.tokens[call.dot];
            let line_break = self.line_break(ctx, dot.line);
            let fix = if ctx.gap_is_blank(call.object_end, call.dot) {
                Fix::replace(object_end.end..dot.start, line_break)
            } else {
                Fix::insert(dot.start, line_break)
            };
            warnings.push(LintWarning::at_token(
                self.name(),
                property,
                format!("Expected line break before `.{}`.", property.text),
                Some(fix),
            ));
        }

        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('.')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Whitespace
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        config_section(&self.config)
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = load_rule_config::<NewlinePerChainedCallConfig>(config);
        let indent_width = load_rule_config::<IndentConfig>(config).width;
        Box::new(Self::from_config_struct(rule_config, indent_width))
    }
}
