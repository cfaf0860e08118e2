//! Pull-based tokenizer.
//!
//! Token recognition is generated by [`logos`]; literal bodies and block comments are scanned by
//! callbacks. [`Lexer`] wraps the generated lexer, attaches line/column positions and turns lex
//! failures into [`Diagnostic`]s.

use crate::ast::BinOp;
use logos::Logos;
use quill_source::{Diagnostic, Location, Source};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // keywords
    Fn,
    Let,
    If,
    Else,
    Return,

    // literals
    Identifier,
    Integer,
    Float,
    String,
    Char,
    Bool,

    // punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semi,
    Dot,

    // operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Less,
    Greater,
    Bang,
    Arrow,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    EqEq,
    Neq,
    Leq,
    Geq,

    Eof,
}

impl TokenKind {
    /// Returns the binary operator with its binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// Every tier is left-associative (`r_bp = l_bp + 1`).
    pub fn binop_bp(self) -> Option<(BinOp, u8, u8)> {
        match self {
            /* Equality */
            TokenKind::Eq => Some((BinOp::Eq, 2, 3)),
            /* Comparison */
            TokenKind::Leq => Some((BinOp::LessEq, 4, 5)),
            /* Additive */
            TokenKind::Plus => Some((BinOp::Add, 6, 7)),
            TokenKind::Minus => Some((BinOp::Sub, 6, 7)),
            /* Multiplicative */
            TokenKind::Star => Some((BinOp::Mul, 8, 9)),
            TokenKind::Slash => Some((BinOp::Div, 8, 9)),
            _ => None,
        }
    }
}

/// A classified piece of source text.
///
/// For [`TokenKind::String`] and [`TokenKind::Char`] the lexeme is the decoded literal value,
/// otherwise it is the source slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Error)]
pub enum LexErrorKind {
    /// No rule matched. Rewritten into [`LexErrorKind::UnexpectedCharacter`] by [`Lexer`].
    #[default]
    #[error("Unrecognized input")]
    Unrecognized,
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated block comment")]
    UnterminatedComment,
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Invalid escape sequence: \\{0}")]
    InvalidEscape(char),
    #[error("Empty char literal")]
    EmptyChar,
    #[error("Unterminated char literal")]
    UnterminatedChar,
    #[error("Char literal must contain exactly one character")]
    OverlongChar,
}

#[derive(Debug, Logos, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\x0B\x0C]+|//[^\n]*")]
enum RawToken {
    /// Token whose lexeme is its source slice.
    // literals
    #[regex("[0-9]+", number)]
    #[token("true", |_| TokenKind::Bool)]
    #[token("false", |_| TokenKind::Bool)]
    // identifiers
    #[regex("[A-Za-z_][A-Za-z0-9_]*", |_| TokenKind::Identifier)]
    // keywords
    #[token("fn", |_| TokenKind::Fn)]
    #[token("let", |_| TokenKind::Let)]
    #[token("if", |_| TokenKind::If)]
    #[token("else", |_| TokenKind::Else)]
    #[token("return", |_| TokenKind::Return)]
    // punctuation
    #[token("(", |_| TokenKind::LParen)]
    #[token(")", |_| TokenKind::RParen)]
    #[token("{", |_| TokenKind::LBrace)]
    #[token("}", |_| TokenKind::RBrace)]
    #[token(",", |_| TokenKind::Comma)]
    #[token(":", |_| TokenKind::Colon)]
    #[token(";", |_| TokenKind::Semi)]
    #[token(".", |_| TokenKind::Dot)]
    // operators
    #[token("+", |_| TokenKind::Plus)]
    #[token("-", |_| TokenKind::Minus)]
    #[token("*", |_| TokenKind::Star)]
    #[token("/", |_| TokenKind::Slash)]
    #[token("=", |_| TokenKind::Eq)]
    #[token("<", |_| TokenKind::Less)]
    #[token(">", |_| TokenKind::Greater)]
    #[token("!", |_| TokenKind::Bang)]
    #[token("->", |_| TokenKind::Arrow)]
    #[token("+=", |_| TokenKind::PlusAssign)]
    #[token("-=", |_| TokenKind::MinusAssign)]
    #[token("*=", |_| TokenKind::StarAssign)]
    #[token("/=", |_| TokenKind::SlashAssign)]
    #[token("==", |_| TokenKind::EqEq)]
    #[token("!=", |_| TokenKind::Neq)]
    #[token("<=", |_| TokenKind::Leq)]
    #[token(">=", |_| TokenKind::Geq)]
    Plain(TokenKind),

    /// Decoded string literal.
    #[token("\"", string)]
    String(String),
    /// Decoded char literal.
    #[token("'", char_literal)]
    Char(char),

    #[token("/*", block_comment)]
    BlockComment,
}

/// Extends an integer into a float when the decimal point is immediately followed by a digit.
fn number(lex: &mut logos::Lexer<RawToken>) -> TokenKind {
    let rest = lex.remainder().as_bytes();
    match rest {
        [b'.', next, ..] if next.is_ascii_digit() => {
            let fraction = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            lex.bump(1 + fraction);
            TokenKind::Float
        }
        _ => TokenKind::Integer,
    }
}

fn string(lex: &mut logos::Lexer<RawToken>) -> Result<String, LexErrorKind> {
    let (consumed, value) = scan_string(lex.remainder());
    lex.bump(consumed);
    value
}

fn char_literal(lex: &mut logos::Lexer<RawToken>) -> Result<char, LexErrorKind> {
    let (consumed, value) = scan_char(lex.remainder());
    lex.bump(consumed);
    value
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            let rest = lex.remainder().len();
            lex.bump(rest);
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Scans a string body up to and including the closing quote.
/// Returns the number of bytes consumed, on failure up to the offending character.
fn scan_string(rest: &str) -> (usize, Result<String, LexErrorKind>) {
    let mut value = String::new();
    let mut chars = rest.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => return (offset + 1, Ok(value)),
            '\\' => {
                let Some((offset, escaped)) = chars.next() else {
                    break;
                };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return (
                            offset + escaped.len_utf8(),
                            Err(LexErrorKind::InvalidEscape(escaped)),
                        )
                    }
                }
            }
            c => value.push(c),
        }
    }
    (rest.len(), Err(LexErrorKind::UnterminatedString))
}

/// Scans a char literal body up to and including the closing quote.
fn scan_char(rest: &str) -> (usize, Result<char, LexErrorKind>) {
    let mut chars = rest.char_indices();
    let value = match chars.next() {
        None => return (rest.len(), Err(LexErrorKind::UnterminatedChar)),
        Some((offset, '\'')) => return (offset + 1, Err(LexErrorKind::EmptyChar)),
        Some((_, '\\')) => match chars.next() {
            None => return (rest.len(), Err(LexErrorKind::UnterminatedChar)),
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, '\\')) => '\\',
            Some((_, '\'')) => '\'',
            Some((_, '"')) => '"',
            Some((offset, escaped)) => {
                return (
                    offset + escaped.len_utf8(),
                    Err(LexErrorKind::InvalidEscape(escaped)),
                )
            }
        },
        Some((_, c)) => c,
    };
    match chars.next() {
        Some((offset, '\'')) => (offset + 1, Ok(value)),
        Some((offset, c)) => (offset + c.len_utf8(), Err(LexErrorKind::OverlongChar)),
        None => (rest.len(), Err(LexErrorKind::UnterminatedChar)),
    }
}

/// Produces one [`Token`] per call over a single source buffer.
pub struct Lexer<'a> {
    source: &'a Source<'a>,
    inner: logos::Lexer<'a, RawToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            source,
            inner: RawToken::lexer(source.content),
        }
    }

    pub fn source(&self) -> &'a Source<'a> {
        self.source
    }

    /// Consumes and returns the next token. Returns [`TokenKind::Eof`] once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        let (kind, lexeme) = loop {
            match self.inner.next() {
                None => {
                    let Location { line, column } = self.source.location(self.source.content.len());
                    return Ok(Token {
                        kind: TokenKind::Eof,
                        lexeme: String::new(),
                        line,
                        column,
                    });
                }
                Some(Err(kind)) => return Err(self.error(kind)),
                Some(Ok(RawToken::BlockComment)) => continue,
                Some(Ok(RawToken::Plain(kind))) => break (kind, self.inner.slice().to_string()),
                Some(Ok(RawToken::String(value))) => break (TokenKind::String, value),
                Some(Ok(RawToken::Char(value))) => break (TokenKind::Char, value.to_string()),
            }
        };
        let Location { line, column } = self.source.location(self.inner.span().start);

        trace!(?kind, %lexeme, line, column, "token");
        Ok(Token {
            kind,
            lexeme,
            line,
            column,
        })
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token, Diagnostic> {
        let snapshot = self.inner.clone();
        let token = self.next_token();
        self.inner = snapshot;
        token
    }

    fn error(&self, kind: LexErrorKind) -> Diagnostic {
        let span = self.inner.span();
        let (offset, kind) = match kind {
            LexErrorKind::Unrecognized => {
                let c = self.source.content[span.start..]
                    .chars()
                    .next()
                    .unwrap_or_default();
                (span.start, LexErrorKind::UnexpectedCharacter(c))
            }
            kind => (self.source.last_char_offset(span.end), kind),
        };

        let Location { line, column } = self.source.location(offset);
        self.source.annotate(Diagnostic::lex(kind, line, column))
    }
}
