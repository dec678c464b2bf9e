//!
//! Shared, pre-computed view of a JavaScript source text that every rule reads from.
//! Holds the token stream, line table, bracket structure and the syntax errors
//! that make a snippet unlintable.

use crate::lexer::{Token, TokenKind, tokenize};
use std::collections::{HashMap, HashSet};

/// How a `{` is used, which decides most of the spacing and layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceKind {
    /// Statement block, function or class body
    Block,
    /// Object literal or destructuring pattern
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

pub struct LintContext<'a> {
    pub content: &'a str,
    pub tokens: Vec<Token<'a>>,
    /// Byte offset of the start of every line
    pub line_offsets: Vec<usize>,
    /// Lines split on `\n`; a trailing newline yields a final empty line
    pub lines: Vec<&'a str>,
    pub syntax_errors: Vec<SyntaxError>,
    significant: Vec<usize>,
    sig_rank: HashMap<usize, usize>,
    pairs: HashMap<usize, usize>,
    enclosing: Vec<Option<usize>>,
    brace_kinds: HashMap<usize, BraceKind>,
    ternary_colons: HashSet<usize>,
    line_first_token: Vec<Option<usize>>,
    continued_lines: Vec<bool>,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str) -> Self {
        let (tokens, lex_errors) = tokenize(content);

        let mut line_offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_offsets.push(i + 1);
            }
        }
        let lines: Vec<&str> = content.split('\n').collect();

        let mut ctx = Self {
            content,
            tokens,
            line_offsets,
            lines,
            syntax_errors: Vec::new(),
            significant: Vec::new(),
            sig_rank: HashMap::new(),
            pairs: HashMap::new(),
            enclosing: Vec::new(),
            brace_kinds: HashMap::new(),
            ternary_colons: HashSet::new(),
            line_first_token: Vec::new(),
            continued_lines: Vec::new(),
        };

        for err in lex_errors {
            let (line, column) = ctx.offset_to_line_col(err.offset);
            ctx.syntax_errors.push(SyntaxError {
                message: err.message,
                line,
                column,
            });
        }

        ctx.index_lines();
        ctx.analyze_structure();
        ctx.validate_spreads();
        ctx
    }

    fn index_lines(&mut self) {
        let line_count = self.lines.len();
        self.line_first_token = vec![None; line_count];
        self.continued_lines = vec![false; line_count];

        for (idx, token) in self.tokens.iter().enumerate() {
            if !token.is_trivia() {
                self.sig_rank.insert(idx, self.significant.len());
                self.significant.push(idx);
            }
            if !token.is_blank() && self.line_first_token[token.line - 1].is_none() {
                self.line_first_token[token.line - 1] = Some(idx);
            }
            for line in token.line + 1..=token.end_line {
                if let Some(flag) = self.continued_lines.get_mut(line - 1) {
                    *flag = true;
                }
            }
        }
    }

    /// Pair brackets, classify braces and find ternary colons in one walk.
    fn analyze_structure(&mut self) {
        let mut stack: Vec<usize> = Vec::new();
        // Open `?` count per bracket depth, index 0 is the top level
        let mut pending_ternaries: Vec<usize> = vec![0];
        self.enclosing = vec![None; self.tokens.len()];

        let significant = self.significant.clone();
        for (rank, &idx) in significant.iter().enumerate() {
            let token = self.tokens[idx].clone();
            self.enclosing[idx] = stack.last().copied();

            if token.is_opener() {
                if token.text == "{" {
                    let prev = rank.checked_sub(1).map(|r| significant[r]);
                    let kind = self.classify_brace(prev, stack.last().copied());
                    self.brace_kinds.insert(idx, kind);
                }
                stack.push(idx);
                pending_ternaries.push(0);
            } else if token.is_closer() {
                let expected = match token.text {
                    ")" => "(",
                    "]" => "[",
                    _ => "{",
                };
                match stack.last().copied() {
                    Some(open) if self.tokens[open].text == expected => {
                        stack.pop();
                        pending_ternaries.pop();
                        self.pairs.insert(open, idx);
                        self.pairs.insert(idx, open);
                        self.enclosing[idx] = stack.last().copied();
                    }
                    _ => self.push_syntax_error(idx, format!("Unexpected token {}", token.text)),
                }
            } else if token.is_punct("?") {
                if let Some(count) = pending_ternaries.last_mut() {
                    *count += 1;
                }
            } else if token.is_punct(":")
                && let Some(count) = pending_ternaries.last_mut()
                && *count > 0
            {
                *count -= 1;
                self.ternary_colons.insert(idx);
            }
        }

        // Trivia inherit the enclosing bracket of the significant token before them
        let mut current = None;
        for idx in 0..self.tokens.len() {
            if self.sig_rank.contains_key(&idx) {
                current = if self.tokens[idx].is_opener() {
                    Some(idx)
                } else {
                    self.enclosing[idx]
                };
            } else {
                self.enclosing[idx] = current;
            }
        }

        if !stack.is_empty() {
            let last = self.lines.len() - 1;
            let column = self.lines[last].chars().count() + 1;
            self.syntax_errors.push(SyntaxError {
                message: "Unexpected end of input".to_string(),
                line: last + 1,
                column,
            });
        }
    }

    fn classify_brace(&self, prev: Option<usize>, outer: Option<usize>) -> BraceKind {
        let Some(prev) = prev else {
            return BraceKind::Block;
        };
        let outer_kind = outer.and_then(|o| self.brace_kinds.get(&o).copied());
        let token = &self.tokens[prev];
        match token.kind {
            TokenKind::Punctuator => match token.text {
                ")" | "=>" | ";" | "}" => BraceKind::Block,
                "{" => outer_kind.unwrap_or(BraceKind::Block),
                ":" if self.ternary_colons.contains(&prev) => BraceKind::Object,
                ":" if self.is_case_label_colon(prev) => BraceKind::Block,
                ":" if outer_kind == Some(BraceKind::Object) => BraceKind::Object,
                ":" => BraceKind::Block,
                _ => BraceKind::Object,
            },
            TokenKind::Keyword => match token.text {
                "else" | "try" | "finally" | "do" => BraceKind::Block,
                "return" | "typeof" | "case" | "in" | "yield" | "await" | "void" | "delete" | "throw"
                | "new" | "default" | "instanceof" => BraceKind::Object,
                _ => BraceKind::Block,
            },
            // `class Foo {`, `class Foo extends Bar {`
            TokenKind::Identifier => BraceKind::Block,
            _ => BraceKind::Object,
        }
    }

    fn is_case_label_colon(&self, colon: usize) -> bool {
        let mut cursor = self.prev_sig(colon);
        while let Some(idx) = cursor {
            let token = &self.tokens[idx];
            if token.is_any_keyword(&["case", "default"]) {
                return true;
            }
            if token.is_punct(";") || token.is_punct("{") || token.is_punct("}") || token.is_punct(":") {
                return false;
            }
            cursor = self.prev_sig(idx);
        }
        false
    }

    /// A spread is only valid inside an argument, array or object list, followed by an expression.
    fn validate_spreads(&mut self) {
        let mut errors = Vec::new();
        for &idx in &self.significant {
            if !self.tokens[idx].is_punct("...") {
                continue;
            }
            let prev_ok = self
                .prev_sig(idx)
                .map(|p| self.tokens[p].is_opener() || self.tokens[p].is_punct(","))
                .unwrap_or(false);
            let next_ok = self
                .next_sig(idx)
                .map(|n| self.tokens[n].starts_expression())
                .unwrap_or(false);
            if !prev_ok || !next_ok {
                errors.push(idx);
            }
        }
        for idx in errors {
            self.push_syntax_error(idx, "Unexpected token ...".to_string());
        }
    }

    fn push_syntax_error(&mut self, idx: usize, message: String) {
        let token = &self.tokens[idx];
        self.syntax_errors.push(SyntaxError {
            message,
            line: token.line,
            column: token.column,
        });
    }

    /// Map a byte offset to 1-indexed (line, column)
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let start = self.line_offsets.get(line).copied().unwrap_or(0);
        let end = offset.min(self.content.len());
        let column = self.content.get(start..end).map(|s| s.chars().count()).unwrap_or(0) + 1;
        (line + 1, column)
    }

    pub fn is_valid(&self) -> bool {
        self.syntax_errors.is_empty()
    }

    /// Indices of all non-whitespace, non-comment tokens
    pub fn significant(&self) -> &[usize] {
        &self.significant
    }

    pub fn prev_sig(&self, idx: usize) -> Option<usize> {
        match self.sig_rank.get(&idx) {
            Some(&rank) => rank.checked_sub(1).map(|r| self.significant[r]),
            None => (0..idx).rev().find(|&i| !self.tokens[i].is_trivia()),
        }
    }

    pub fn next_sig(&self, idx: usize) -> Option<usize> {
        match self.sig_rank.get(&idx) {
            Some(&rank) => self.significant.get(rank + 1).copied(),
            None => (idx + 1..self.tokens.len()).find(|&i| !self.tokens[i].is_trivia()),
        }
    }

    /// The matching bracket of an opener or closer
    pub fn matching(&self, idx: usize) -> Option<usize> {
        self.pairs.get(&idx).copied()
    }

    /// The innermost unclosed bracket around a token
    pub fn enclosing(&self, idx: usize) -> Option<usize> {
        self.enclosing.get(idx).copied().flatten()
    }

    pub fn brace_kind(&self, idx: usize) -> Option<BraceKind> {
        self.brace_kinds.get(&idx).copied()
    }

    /// Kind of the brace a closing `}` belongs to
    pub fn closing_brace_kind(&self, idx: usize) -> Option<BraceKind> {
        self.matching(idx).and_then(|open| self.brace_kind(open))
    }

    pub fn is_ternary_colon(&self, idx: usize) -> bool {
        self.ternary_colons.contains(&idx)
    }

    /// Whether the colon separates an object key from its value
    pub fn is_object_key_colon(&self, idx: usize) -> bool {
        self.tokens[idx].is_punct(":")
            && !self.is_ternary_colon(idx)
            && self
                .enclosing(idx)
                .is_some_and(|open| self.brace_kind(open) == Some(BraceKind::Object))
    }

    /// Whether a `{` opens the body of a `switch`
    pub fn is_switch_body(&self, idx: usize) -> bool {
        self.tokens[idx].is_punct("{")
            && self
                .prev_sig(idx)
                .filter(|&p| self.tokens[p].is_punct(")"))
                .and_then(|p| self.matching(p))
                .and_then(|open| self.prev_sig(open))
                .is_some_and(|kw| self.tokens[kw].is_keyword("switch"))
    }

    /// Whether a token is an operand-level binary operator (arithmetic, comparison,
    /// logical, assignment or a ternary part), as opposed to a unary or other use.
    pub fn is_binary_operator(&self, idx: usize) -> bool {
        let token = &self.tokens[idx];
        if token.kind != TokenKind::Punctuator {
            return false;
        }
        let after_operand = self.prev_sig(idx).is_some_and(|p| self.tokens[p].ends_operand());
        match token.text {
            "+" | "-" | "*" | "/" | "%" | "**" | "<<" | ">>" | ">>>" | "&" | "|" | "^" => after_operand,
            "==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" | "&&" | "||" | "??" => true,
            "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "**=" | "<<=" | ">>=" | ">>>=" | "&=" | "|=" | "^=" | "&&="
            | "||=" | "??=" => true,
            "?" => true,
            ":" => self.is_ternary_colon(idx),
            _ => false,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// First non-whitespace token starting on a 1-indexed line
    pub fn first_token_on_line(&self, line: usize) -> Option<usize> {
        self.line_first_token.get(line.wrapping_sub(1)).copied().flatten()
    }

    /// Whether a 1-indexed line begins inside a multi-line comment, string or template
    pub fn starts_inside_token(&self, line: usize) -> bool {
        self.continued_lines.get(line.wrapping_sub(1)).copied().unwrap_or(false)
    }

    /// Source text between the end of token `a` and the start of token `b`
    pub fn gap(&self, a: usize, b: usize) -> &'a str {
        &self.content[self.tokens[a].end..self.tokens[b].start]
    }

    /// Whether only whitespace and newlines lie between two tokens
    pub fn gap_is_blank(&self, a: usize, b: usize) -> bool {
        (a + 1..b).all(|i| self.tokens[i].is_blank())
    }

    /// Leading whitespace of a 1-indexed line
    pub fn indentation(&self, line: usize) -> &'a str {
        let text = self.lines.get(line.wrapping_sub(1)).copied().unwrap_or("");
        let len = text.len() - text.trim_start_matches([' ', '\t']).len();
        &text[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(ctx: &LintContext, text: &str, nth: usize) -> usize {
        ctx.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.text == text)
            .map(|(i, _)| i)
            .nth(nth)
            .unwrap()
    }

    #[test]
    fn test_empty_content() {
        let ctx = LintContext::new("");
        assert!(ctx.tokens.is_empty());
        assert_eq!(ctx.line_offsets, vec![0]);
        assert_eq!(ctx.lines, vec![""]);
        assert!(ctx.is_valid());
    }

    #[test]
    fn test_offset_to_line_col() {
        let ctx = LintContext::new("ab\ncd\n");
        assert_eq!(ctx.offset_to_line_col(0), (1, 1));
        assert_eq!(ctx.offset_to_line_col(4), (2, 2));
        assert_eq!(ctx.offset_to_line_col(6), (3, 1));
    }

    #[test]
    fn test_brace_kinds() {
        let ctx = LintContext::new("if (a) { var o = { k: { n: 1 } }; }");
        assert_eq!(ctx.brace_kind(find(&ctx, "{", 0)), Some(BraceKind::Block));
        assert_eq!(ctx.brace_kind(find(&ctx, "{", 1)), Some(BraceKind::Object));
        assert_eq!(ctx.brace_kind(find(&ctx, "{", 2)), Some(BraceKind::Object));
    }

    #[test]
    fn test_arrow_and_else_bodies_are_blocks() {
        let ctx = LintContext::new("x(() => { y(); });\nif (a) {} else { b(); }");
        assert_eq!(ctx.brace_kind(find(&ctx, "{", 0)), Some(BraceKind::Block));
        assert_eq!(ctx.brace_kind(find(&ctx, "{", 2)), Some(BraceKind::Block));
    }

    #[test]
    fn test_ternary_and_key_colons() {
        let ctx = LintContext::new("var o = { a: b ? 1 : 2 };");
        let key_colon = find(&ctx, ":", 0);
        let ternary_colon = find(&ctx, ":", 1);
        assert!(ctx.is_object_key_colon(key_colon));
        assert!(ctx.is_ternary_colon(ternary_colon));
        assert!(!ctx.is_object_key_colon(ternary_colon));
    }

    #[test]
    fn test_switch_case_blocks() {
        let ctx = LintContext::new("switch (a) {\ncase 1: {\nb();\n}\n}");
        assert!(ctx.is_switch_body(find(&ctx, "{", 0)));
        assert_eq!(ctx.brace_kind(find(&ctx, "{", 1)), Some(BraceKind::Block));
    }

    #[test]
    fn test_unbalanced_brackets_are_syntax_errors() {
        assert!(!LintContext::new("f(a").is_valid());
        assert!(!LintContext::new("f(a]").is_valid());
        assert!(!LintContext::new("}").is_valid());
    }

    #[test]
    fn test_spread_validation() {
        assert!(LintContext::new("f(...args, [...xs], { ...o })").is_valid());
        assert!(!LintContext::new("f(...)").is_valid());
        assert!(!LintContext::new("...").is_valid());
        assert!(!LintContext::new("{ ... }").is_valid());
    }

    #[test]
    fn test_binary_operator_detection() {
        let ctx = LintContext::new("a = -b + c");
        assert!(ctx.is_binary_operator(find(&ctx, "=", 0)));
        assert!(!ctx.is_binary_operator(find(&ctx, "-", 0)));
        assert!(ctx.is_binary_operator(find(&ctx, "+", 0)));
    }

    #[test]
    fn test_lines_inside_multiline_tokens() {
        let ctx = LintContext::new("a();\n/* one\ntwo */\nb();");
        assert!(!ctx.starts_inside_token(2));
        assert!(ctx.starts_inside_token(3));
        assert!(!ctx.starts_inside_token(4));
    }
}
