pub mod js_utils;

mod brace_style;
mod comma_dangle;
mod comma_spacing;
mod dot_location;
mod eqeqeq;
pub mod indent;
mod key_spacing;
mod no_else_return;
mod no_extra_semi;
mod operator_linebreak;
mod semi_spacing;
mod space_before_function_paren;
mod space_infix_ops;
mod spaced_comment;
mod yoda;

mod capitalized_comments;
mod curly;
mod func_call_spacing;
pub mod newline_per_chained_call;
mod no_floating_decimal;
mod no_lonely_if;
mod no_multi_spaces;
pub mod no_multiple_empty_lines;
mod no_trailing_spaces;
mod quote_props;
mod quotes;

pub use brace_style::BraceStyle;
pub use comma_dangle::CommaDangle;
pub use comma_spacing::CommaSpacing;
pub use dot_location::DotLocation;
pub use eqeqeq::Eqeqeq;
pub use indent::{Indent, IndentConfig};
pub use key_spacing::KeySpacing;
pub use no_else_return::NoElseReturn;
pub use no_extra_semi::NoExtraSemi;
pub use operator_linebreak::OperatorLinebreak;
pub use semi_spacing::SemiSpacing;
pub use space_before_function_paren::SpaceBeforeFunctionParen;
pub use space_infix_ops::SpaceInfixOps;
pub use spaced_comment::SpacedComment;
pub use yoda::Yoda;

pub use capitalized_comments::CapitalizedComments;
pub use curly::Curly;
pub use func_call_spacing::FuncCallSpacing;
pub use newline_per_chained_call::{NewlinePerChainedCall, NewlinePerChainedCallConfig};
pub use no_floating_decimal::NoFloatingDecimal;
pub use no_lonely_if::NoLonelyIf;
pub use no_multi_spaces::NoMultiSpaces;
pub use no_multiple_empty_lines::{NoMultipleEmptyLines, NoMultipleEmptyLinesConfig};
pub use no_trailing_spaces::NoTrailingSpaces;
pub use quote_props::QuoteProps;
pub use quotes::Quotes;

use crate::config::Config;
use crate::rule::Rule;

macro_rules! rule {
    ($config:expr, $ctor:ident) => {
        $ctor::from_config($config)
    };
}

/// Structural rules, applied first and fixed to completion
pub fn base_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    vec![
        rule!(config, BraceStyle),
        rule!(config, CommaDangle),
        rule!(config, CommaSpacing),
        rule!(config, DotLocation),
        rule!(config, Eqeqeq),
        rule!(config, Indent),
        rule!(config, KeySpacing),
        rule!(config, NoElseReturn),
        rule!(config, NoExtraSemi),
        rule!(config, OperatorLinebreak),
        rule!(config, SemiSpacing),
        rule!(config, SpaceBeforeFunctionParen),
        rule!(config, SpaceInfixOps),
        rule!(config, SpacedComment),
        rule!(config, Yoda),
    ]
}

/// Style rules for tutorial snippets, applied to base-normalized text
pub fn tutorial_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    vec![
        rule!(config, CapitalizedComments),
        rule!(config, Curly),
        rule!(config, FuncCallSpacing),
        rule!(config, NewlinePerChainedCall),
        rule!(config, NoFloatingDecimal),
        rule!(config, NoLonelyIf),
        rule!(config, NoMultiSpaces),
        rule!(config, NoMultipleEmptyLines),
        rule!(config, NoTrailingSpaces),
        rule!(config, QuoteProps),
        rule!(config, Quotes),
    ]
}

/// Returns all rule instances, base phase first, for config validation and the CLI
pub fn all_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let mut rules = base_rules(config);
    rules.extend(tutorial_rules(config));
    rules
}

pub fn all_rule_names() -> Vec<&'static str> {
    all_rules(&Config::default()).iter().map(|rule| rule.name()).collect()
}
