//! Reads Quill source files and turns them into syntax trees.

use quill_parser::ast::Program;
use quill_parser::lexer::Lexer;
use quill_parser::parser::Parser;
use quill_source::{Diagnostic, Source};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not open file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Syntax(#[from] Diagnostic),
}

/// Parses `content` with the nesting limit `max_depth`.
pub fn parse_str(content: &str, max_depth: usize) -> Result<Program, Diagnostic> {
    let source = Source::new(content);
    Parser::new(Lexer::new(&source))?
        .with_max_depth(max_depth)
        .parse_program()
}

/// Reads and parses the file at `path`.
pub fn parse_file(path: &Path, max_depth: usize) -> Result<Program, Error> {
    info!(path = %path.display(), "reading source file");
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_str(&content, max_depth)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_parser::parser::DEFAULT_MAX_DEPTH;

    #[test]
    fn test_missing_file() {
        let err = parse_file(Path::new("does/not/exist.ql"), DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.to_string(), "Could not open file: does/not/exist.ql");
    }

    #[test]
    fn test_syntax_error_is_transparent() {
        let err = Error::from(parse_str("fn", DEFAULT_MAX_DEPTH).unwrap_err());
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, col 3: Expected function name\nfn\n  ^"
        );
    }

    #[test]
    fn test_max_depth_is_applied() {
        let content = "fn f() -> Int { return ((1)) }";
        assert!(parse_str(content, 4).is_ok());
        assert!(parse_str(content, 3).is_err());
    }
}
