//! Tolerant JavaScript tokenizer built on [`logos`].
//!
//! Every byte of the input belongs to exactly one token, so token spans can be used
//! directly as fix ranges. Malformed input never aborts tokenization: unterminated
//! literals and comments are reported as [`LexError`]s and the token simply runs to
//! the end of the line (strings) or the end of the input (comments, templates).
//! Whether `/` starts a regex is carried in the lexer extras, decided by the
//! previous significant token.

use logos::{Lexer, Logos};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Newline,
    LineComment,
    BlockComment,
    String,
    Template,
    Regex,
    Number,
    Identifier,
    Keyword,
    Punctuator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
    /// 1-indexed line of the first character
    pub line: usize,
    /// 1-indexed column (in characters) of the first character
    pub column: usize,
    /// 1-indexed line of the last character
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

const KEYWORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do", "else",
    "export", "extends", "false", "finally", "for", "function", "if", "import", "in", "instanceof", "let", "new",
    "null", "return", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield",
];

/// Keywords that evaluate to a value and can therefore end an operand.
const VALUE_KEYWORDS: &[&str] = &["this", "super", "null", "true", "false"];

impl<'a> Token<'a> {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Newline)
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.text == punct
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_any_keyword(&self, keywords: &[&str]) -> bool {
        self.kind == TokenKind::Keyword && keywords.contains(&self.text)
    }

    pub fn is_opener(&self) -> bool {
        self.kind == TokenKind::Punctuator && matches!(self.text, "(" | "[" | "{")
    }

    pub fn is_closer(&self) -> bool {
        self.kind == TokenKind::Punctuator && matches!(self.text, ")" | "]" | "}")
    }

    pub fn is_literal(&self) -> bool {
        match self.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Template | TokenKind::Regex => true,
            TokenKind::Keyword => matches!(self.text, "null" | "true" | "false"),
            _ => false,
        }
    }

    /// Whether this token can be the last token of an operand, which decides
    /// between binary and unary readings of `+`/`-` and between division and regex.
    pub fn ends_operand(&self) -> bool {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Template
            | TokenKind::Regex => true,
            TokenKind::Keyword => VALUE_KEYWORDS.contains(&self.text),
            TokenKind::Punctuator => matches!(self.text, ")" | "]"),
            _ => false,
        }
    }

    /// Whether an expression may begin with this token.
    pub fn starts_expression(&self) -> bool {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Template
            | TokenKind::Regex => true,
            TokenKind::Keyword => matches!(
                self.text,
                "this"
                    | "super"
                    | "null"
                    | "true"
                    | "false"
                    | "function"
                    | "class"
                    | "new"
                    | "typeof"
                    | "void"
                    | "delete"
                    | "await"
                    | "yield"
            ),
            TokenKind::Punctuator => matches!(self.text, "(" | "[" | "{" | "!" | "-" | "+" | "~" | "++" | "--"),
            _ => false,
        }
    }
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Whether a `/` at the current position would start a regex literal
#[derive(Debug, Clone, Copy)]
struct LexState {
    regex_allowed: bool,
}

impl Default for LexState {
    fn default() -> Self {
        Self { regex_allowed: true }
    }
}

/// How a literal or comment that needs a closing delimiter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing {
    Closed,
    Unterminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slash {
    Division,
    Regex,
}

/// Raw scanner output; keyword and member-name decisions are made afterwards
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexState)]
enum RawToken {
    #[token("\n")]
    Newline,

    #[regex(r"[ \t\r\u{0b}\u{0c}\u{a0}\u{feff}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment(Closing),

    #[token("'", |lex| string_body(lex, '\''))]
    #[token("\"", |lex| string_body(lex, '"'))]
    String(Closing),

    #[token("`", template_body)]
    Template(Closing),

    #[token("/", slash)]
    #[token("/=", slash)]
    Slash(Slash),

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?n?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xXbBoO][0-9a-fA-F_]+n?")]
    Number,

    #[regex(r"#?[\p{L}\p{Nl}_$][\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}$\u{200c}\u{200d}]*")]
    Word,

    #[token(">>>=")]
    #[token("...")]
    #[token("===")]
    #[token("!==")]
    #[token("**=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token(">>>")]
    #[token("&&=")]
    #[token("||=")]
    #[token("??=")]
    #[token("=>")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("?.")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("**")]
    #[token("<<")]
    #[token(">>")]
    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    #[token("<")]
    #[token(">")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("!")]
    #[token("~")]
    #[token("?")]
    #[token(":")]
    #[token("=")]
    #[token(".")]
    #[token("@")]
    Punctuator,
}

fn block_comment(lex: &mut Lexer<'_, RawToken>) -> Closing {
    match lex.remainder().find("*/") {
        Some(i) => {
            lex.bump(i + 2);
            Closing::Closed
        }
        None => {
            lex.bump(lex.remainder().len());
            Closing::Unterminated
        }
    }
}

/// Strings stop at an unescaped newline so one bad quote does not swallow the snippet
fn string_body(lex: &mut Lexer<'_, RawToken>, quote: char) -> Closing {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\n' => {
                lex.bump(i);
                return Closing::Unterminated;
            }
            ch if ch == quote => {
                lex.bump(i + ch.len_utf8());
                return Closing::Closed;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Closing::Unterminated
}

fn template_body(lex: &mut Lexer<'_, RawToken>) -> Closing {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    let mut depth = 0usize;
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '$' if depth == 0 && chars.peek().is_some_and(|&(_, n)| n == '{') => {
                chars.next();
                depth = 1;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '`' if depth == 0 => {
                lex.bump(i + 1);
                return Closing::Closed;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Closing::Unterminated
}

fn slash(lex: &mut Lexer<'_, RawToken>) -> Slash {
    if !lex.extras.regex_allowed {
        return Slash::Division;
    }
    let start = lex.span().start;
    match regex_len(&lex.source()[start..]) {
        Some(len) => {
            lex.bump(len - lex.slice().len());
            Slash::Regex
        }
        None => Slash::Division,
    }
}

/// Length of the regex literal at the start of `text`, flags included
fn regex_len(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().skip(1);
    let mut in_class = false;
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\n' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let flags = text[i + 1..]
                    .char_indices()
                    .find(|&(_, f)| !f.is_ascii_alphabetic())
                    .map(|(j, _)| j)
                    .unwrap_or(text.len() - i - 1);
                return Some(i + 1 + flags);
            }
            _ => {}
        }
    }
    None
}

/// Line and column bookkeeping over the raw scanner
struct Tokenizer<'a> {
    src: &'a str,
    line: usize,
    column: usize,
    tokens: Vec<Token<'a>>,
    errors: Vec<LexError>,
    last_significant: Option<usize>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
            last_significant: None,
        }
    }

    fn push(&mut self, kind: TokenKind, span: Range<usize>) {
        let text = &self.src[span.clone()];
        let newlines = if kind == TokenKind::Newline {
            0
        } else {
            text.matches('\n').count()
        };
        let token = Token {
            kind,
            text,
            start: span.start,
            end: span.end,
            line: self.line,
            column: self.column,
            end_line: self.line + newlines,
        };

        if kind == TokenKind::Newline {
            self.line += 1;
            self.column = 1;
        } else if newlines > 0 {
            self.line += newlines;
            let tail = text.rsplit('\n').next().unwrap_or("");
            self.column = tail.chars().count() + 1;
        } else {
            self.column += text.chars().count();
        }

        if !token.is_trivia() {
            self.last_significant = Some(self.tokens.len());
        }
        self.tokens.push(token);
    }

    fn after_member_access(&self) -> bool {
        self.last_significant
            .is_some_and(|i| self.tokens[i].is_punct(".") || self.tokens[i].is_punct("?."))
    }

    fn regex_allowed(&self) -> bool {
        match self.last_significant.map(|i| &self.tokens[i]) {
            None => true,
            Some(token) => match token.kind {
                TokenKind::Punctuator => !matches!(token.text, ")" | "]"),
                TokenKind::Keyword => !VALUE_KEYWORDS.contains(&token.text),
                _ => false,
            },
        }
    }

    fn unterminated(&mut self, closing: Closing, message: &str, offset: usize) {
        if closing == Closing::Unterminated {
            self.errors.push(LexError {
                message: message.to_string(),
                offset,
            });
        }
    }

    fn run(mut self) -> (Vec<Token<'a>>, Vec<LexError>) {
        let mut lex = RawToken::lexer(self.src);
        while let Some(raw) = lex.next() {
            let mut span = lex.span();
            let kind = match raw {
                Ok(RawToken::Newline) => TokenKind::Newline,
                Ok(RawToken::Whitespace) => TokenKind::Whitespace,
                Ok(RawToken::LineComment) => TokenKind::LineComment,
                Ok(RawToken::BlockComment(closing)) => {
                    self.unterminated(closing, "Unterminated comment", span.start);
                    TokenKind::BlockComment
                }
                Ok(RawToken::String(closing)) => {
                    self.unterminated(closing, "Unterminated string constant", span.start);
                    TokenKind::String
                }
                Ok(RawToken::Template(closing)) => {
                    self.unterminated(closing, "Unterminated template", span.start);
                    TokenKind::Template
                }
                Ok(RawToken::Slash(Slash::Regex)) => TokenKind::Regex,
                Ok(RawToken::Slash(Slash::Division)) | Ok(RawToken::Punctuator) => TokenKind::Punctuator,
                Ok(RawToken::Number) => TokenKind::Number,
                Ok(RawToken::Word) if is_keyword(lex.slice()) && !self.after_member_access() => TokenKind::Keyword,
                Ok(RawToken::Word) => TokenKind::Identifier,
                Err(()) => {
                    // Unknown characters become one-character punctuators
                    let char_end = span.start + self.src[span.start..].chars().next().map_or(0, char::len_utf8);
                    if span.end < char_end {
                        lex.bump(char_end - span.end);
                        span = lex.span();
                    }
                    TokenKind::Punctuator
                }
            };
            self.push(kind, span);
            if !self.tokens.last().is_some_and(Token::is_trivia) {
                lex.extras.regex_allowed = self.regex_allowed();
            }
        }
        retag_property_keys(&mut self.tokens);
        (self.tokens, self.errors)
    }
}

/// Reserved words used as object keys (`{a: 1, default: 2}`) are plain names.
/// A `default:` right after `{` stays a keyword since it may open a switch body.
fn retag_property_keys(tokens: &mut [Token<'_>]) {
    let significant: Vec<usize> = (0..tokens.len()).filter(|&i| !tokens[i].is_trivia()).collect();
    for pos in 1..significant.len().saturating_sub(1) {
        let [prev, word, next] = [significant[pos - 1], significant[pos], significant[pos + 1]];
        if tokens[word].kind != TokenKind::Keyword || !tokens[next].is_punct(":") {
            continue;
        }
        // `switch (x) { default:` opens with a label, not a key
        let switch_label = matches!(tokens[word].text, "default" | "case")
            && pos >= 2
            && tokens[significant[pos - 2]].is_punct(")");
        let key_position = tokens[prev].is_punct(",") || (tokens[prev].is_punct("{") && !switch_label);
        if key_position {
            tokens[word].kind = TokenKind::Identifier;
        }
    }
}

/// Split `src` into tokens. Concatenating the token texts reproduces `src` exactly.
pub fn tokenize(src: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    Tokenizer::new(src).run()
}
