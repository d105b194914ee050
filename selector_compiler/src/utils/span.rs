//! Source location tracking for selector diagnostics
//!
//! Tokens only carry byte offsets. Line and column information is derived
//! on demand through [`SourceMap`] when a diagnostic is rendered.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based, 0 when unknown)
    pub line: u32,
    /// Column number (1-based, 0 when unknown)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Position known only by its byte offset
    pub fn at_offset(offset: usize) -> Self {
        Self::new(offset, 0, 0)
    }

    pub fn has_line_info(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_line_info() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "@{}", self.offset)
        }
    }
}

/// A half-open span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a span from byte offsets without line information
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(Position::at_offset(start), Position::at_offset(end))
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text covered by this span, `None` if it does not fit `input`
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start.offset..self.end.offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.start.has_line_info() {
            write!(f, "@{}..{}", self.start.offset, self.end.offset)
        } else if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a selector source for position lookup and caret rendering
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Line and column for a byte offset; offsets past the end clamp to the end
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = self.clamp_to_boundary(offset);
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Resolve a byte range into a span with line information
    pub fn span_of(&self, offset: usize, length: usize) -> Span {
        let start = self.position_at(offset);
        let end = self.position_at(offset.saturating_add(length));
        Span::new(start, end)
    }

    /// Line text by line number (1-based)
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Format an error message with the source line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let span = if span.start.has_line_info() {
            *span
        } else {
            self.span_of(span.start.offset, span.len())
        };

        let mut result = format!("error: {}\n", message);
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num = span.start.line.to_string();
            let gutter = " ".repeat(line_num.len());

            result.push_str(&format!("{} |\n", gutter));
            result.push_str(&format!("{} | {}\n", line_num, line));

            let carets = if span.start.line == span.end.line {
                (span.end.column - span.start.column) as usize
            } else {
                line.chars().count() + 1 - span.start.column as usize
            };

            result.push_str(&format!(
                "{} | {}{}\n",
                gutter,
                " ".repeat(span.start.column as usize - 1),
                "^".repeat(carets.max(1))
            ));
        }

        result
    }

    fn clamp_to_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
