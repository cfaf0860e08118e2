//! Source code representation and diagnostics.

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind};

/// Width of a tab stop, used both for column counting and for display.
pub const TAB_WIDTH: usize = 4;

/// Returns the (1-based) column reached after `c` is read at `column`.
/// Tabs jump to the next multiple-of-[`TAB_WIDTH`] stop.
pub fn advance_column(column: usize, c: char) -> usize {
    if c == '\t' {
        column + TAB_WIDTH - (column - 1) % TAB_WIDTH
    } else {
        column + 1
    }
}

/// Replaces every tab in `line` with spaces up to the next tab stop.
pub fn expand_tabs(line: &str) -> String {
    let mut expanded = String::with_capacity(line.len());
    let mut column = 1;
    for c in line.chars() {
        let next = advance_column(column, c);
        if c == '\t' {
            expanded.extend(std::iter::repeat(' ').take(next - column));
        } else {
            expanded.push(c);
        }
        column = next;
    }
    expanded
}

/// A line/column pair. Both are 1-based; the column is the visual column
/// after tab expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Byte offset of the start of every line.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            line_starts,
        }
    }

    /// Maps a byte offset to its line and visual column.
    /// Offsets past the end map to the position just after the last character.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.content.len());
        let line_index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_index];
        let column = self.content[line_start..offset]
            .chars()
            .fold(1, advance_column);
        Location {
            line: line_index + 1,
            column,
        }
    }

    /// Returns the text of the (1-based) `line`, without its line terminator.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.content.len(), |next| next - 1);
        Some(self.content[start..end].trim_end_matches('\r'))
    }

    /// Attaches the text of the diagnostic's line, if that line exists.
    pub fn annotate(&self, diagnostic: Diagnostic) -> Diagnostic {
        match self.line_text(diagnostic.line) {
            Some(text) => diagnostic.with_source_line(text),
            None => diagnostic,
        }
    }

    /// Byte offset of the last character that starts before `end`.
    pub fn last_char_offset(&self, end: usize) -> usize {
        self.content[..end.min(self.content.len())]
            .char_indices()
            .next_back()
            .map_or(0, |(offset, _)| offset)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_column() {
        assert_eq!(advance_column(1, 'a'), 2);
        assert_eq!(advance_column(1, '\t'), 5);
        assert_eq!(advance_column(3, '\t'), 5);
        assert_eq!(advance_column(5, '\t'), 9);
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx"), "    x");
        assert_eq!(expand_tabs("ab\tc"), "ab  c");
        assert_eq!(expand_tabs("no tabs"), "no tabs");
    }

    #[test]
    fn test_location() {
        let source = Source::new("fn\n\tlet x\n");
        assert_eq!(source.location(0), Location { line: 1, column: 1 });
        assert_eq!(source.location(2), Location { line: 1, column: 3 });
        assert_eq!(source.location(3), Location { line: 2, column: 1 });
        assert_eq!(source.location(4), Location { line: 2, column: 5 });
        assert_eq!(source.location(8), Location { line: 2, column: 9 });
        assert_eq!(source.location(100), Location { line: 3, column: 1 });
    }

    #[test]
    fn test_line_text() {
        let source = Source::new("first\r\nsecond\nthird");
        assert_eq!(source.line_text(1), Some("first"));
        assert_eq!(source.line_text(2), Some("second"));
        assert_eq!(source.line_text(3), Some("third"));
        assert_eq!(source.line_text(0), None);
        assert_eq!(source.line_text(4), None);
    }

    #[test]
    fn test_from_str() {
        let source: Source = "a\nb".into();
        assert_eq!(source.content, "a\nb");
        assert_eq!(source.location(2), Location { line: 2, column: 1 });
    }

    #[test]
    fn test_last_char_offset() {
        let source = Source::new("a\"é");
        assert_eq!(source.last_char_offset(4), 2);
        assert_eq!(source.last_char_offset(1), 0);
        assert_eq!(source.last_char_offset(0), 0);
    }
}
