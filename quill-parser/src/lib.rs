//! Lexer, parser and syntax tree for Quill source files.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod visitor;

use ast::Program;
use lexer::Lexer;
use parser::Parser;
use quill_source::{Diagnostic, Source};

/// Parses a whole program with the default nesting limit.
/// Stops at the first lexical or syntax error.
pub fn parse<'a>(source: &'a Source<'a>) -> Result<Program, Diagnostic> {
    Parser::new(Lexer::new(source))?.parse_program()
}
