use crate::ast::{Block, Expr, Function, Param, Program, Stmt, Type};
use crate::lexer::{Lexer, Token, TokenKind};
use quill_source::Diagnostic;
use std::mem;
use tracing::debug;

mod expr;
mod stmt;

/// Default limit for [`Parser::with_max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Highest limit [`Parser::with_max_depth`] accepts.
/// Parsing at this depth must fit in a 2 MiB thread stack, even in debug builds.
pub const MAX_DEPTH_LIMIT: usize = 256;

pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token,
    lexer: Lexer<'a>,
    /// Number of expressions and blocks currently being parsed.
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and reads the first token.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, Diagnostic> {
        Ok(Self {
            current_token: lexer.next_token()?,
            lexer,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Limits how deeply expressions and blocks may nest before parsing fails.
    /// Deeply nested input would otherwise exhaust the call stack, so `max_depth` is clamped to
    /// [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }
}

impl<'a> Parser<'a> {
    /// Parses every function up to the end of the input.
    pub fn parse_program(&mut self) -> Result<Program, Diagnostic> {
        let mut functions = Vec::new();
        while !self.check(TokenKind::Eof) {
            functions.push(self.parse_function()?);
        }

        debug!(functions = functions.len(), "parsed program");
        Ok(Program { functions })
    }

    fn parse_function(&mut self) -> Result<Function, Diagnostic> {
        self.expect(TokenKind::Fn, "`fn`")?;
        let ident = self.expect_ident("Expected function name")?;

        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let ident = self.expect_ident("Expected parameter name")?;
                self.expect(TokenKind::Colon, "`:`")?;
                let ty = self.parse_type("Expected parameter type")?;
                params.push(Param { ident, ty });

                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;

        self.expect(TokenKind::Arrow, "`->`")?;
        let return_type = self.parse_type("Expected return type")?;
        let body = self.parse_block()?;

        Ok(Function {
            ident,
            return_type,
            params,
            body,
        })
    }

    /// Parses a type name. Type names are plain identifiers that are only resolved here.
    fn parse_type(&mut self, missing: &str) -> Result<Type, Diagnostic> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.error(missing));
        }
        match Type::from_name(&self.current_token.lexeme) {
            Some(ty) => {
                self.next()?;
                Ok(ty)
            }
            None => Err(self.error(format!("Unknown type: {}", self.current_token.lexeme))),
        }
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Moves to the next token and returns the one that was current.
    fn next(&mut self) -> Result<Token, Diagnostic> {
        let token = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, token))
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    /// Predicate that tests whether the current token is of `kind` and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, Diagnostic> {
        if self.check(kind) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind, description: &str) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            self.next()
        } else {
            Err(self.error(format!("Expected {}", description)))
        }
    }

    /// Eats an identifier and returns its name, or fails with `missing`.
    fn expect_ident(&mut self, missing: &str) -> Result<String, Diagnostic> {
        if self.check(TokenKind::Identifier) {
            Ok(self.next()?.lexeme)
        } else {
            Err(self.error(missing))
        }
    }

    /// Runs `parse` one nesting level deeper, failing once the depth limit is exceeded.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<T, Diagnostic> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!(
                "Nesting depth exceeds the limit of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Creates an error located at the current token.
    fn error(&self, message: impl ToString) -> Diagnostic {
        let token = &self.current_token;
        self.lexer
            .source()
            .annotate(Diagnostic::parse(message, token.line, token.column))
    }
}
