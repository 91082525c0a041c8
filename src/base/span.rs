//! Source positions.
//!
//! A [`Span`] pairs a byte range with the 1-based line/column of its start.
//! Diagnostics are keyed by the byte offset of the span start, which is stable
//! across re-renders of the same source; line/column exist for display only.

use text_size::{TextRange, TextSize};

/// A region of script source code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte range in the source text.
    pub range: TextRange,
    /// 1-based line of the range start.
    pub line: u32,
    /// 1-based column of the range start.
    pub column: u32,
}

impl Span {
    /// Sentinel span for diagnostics with no natural source position,
    /// e.g. a missing default state. Sorts before every real span.
    pub const NONE: Span = Span {
        range: TextRange::empty(TextSize::new(0)),
        line: 0,
        column: 0,
    };

    /// Create a span from byte offsets and a 1-based start line/column.
    pub fn new(start: u32, end: u32, line: u32, column: u32) -> Self {
        Self {
            range: TextRange::new(TextSize::new(start), TextSize::new(end)),
            line,
            column,
        }
    }

    /// Byte offset of the span start.
    pub fn start(&self) -> u32 {
        self.range.start().into()
    }

    /// Byte offset of the span end.
    pub fn end(&self) -> u32 {
        self.range.end().into()
    }

    /// True for the positionless sentinel.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::NONE
    }
}
