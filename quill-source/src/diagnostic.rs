use crate::expand_tabs;
use std::fmt;

/// Which stage rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lex,
    Parse,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lex => f.write_str("Lex"),
            DiagnosticKind::Parse => f.write_str("Parse"),
        }
    }
}

/// Represents a syntax error (compile time error).
///
/// `line` and `column` are 1-based and `column` is the visual column, with
/// tabs expanded to the next tab stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// The raw text of the offending line, used for the caret display.
    pub source_line: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with the specified `kind`, `message` and position.
    pub fn new(kind: DiagnosticKind, message: impl ToString, line: usize, column: usize) -> Self {
        Self {
            kind,
            message: message.to_string(),
            line,
            column,
            source_line: None,
        }
    }

    pub fn lex(message: impl ToString, line: usize, column: usize) -> Self {
        Self::new(DiagnosticKind::Lex, message, line, column)
    }

    pub fn parse(message: impl ToString, line: usize, column: usize) -> Self {
        Self::new(DiagnosticKind::Parse, message, line, column)
    }

    /// Attaches the text of the offending line.
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{kind} error at line {line}, col {column}: {message}",
            kind = self.kind,
            line = self.line,
            column = self.column,
            message = self.message
        )?;

        if let Some(line) = self.source_line.as_deref().filter(|line| !line.is_empty()) {
            write!(
                f,
                "\n{line}\n{caret:>width$}",
                line = expand_tabs(line),
                caret = "^",
                width = self.column.max(1)
            )?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
