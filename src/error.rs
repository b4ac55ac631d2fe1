//! Error types.
//!
//! Parsing is total except for the conditions in [`ParseError`]. Everything
//! else (unmatched delimiters, bad media sizes, unknown line shapes) falls back
//! to plain text.

use crate::literal::LiteralKind;

/// Fatal parse error. No partial document is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A verbatim region was opened but its end tag never appeared.
    #[error("unterminated <{}> block opened at line {line} (byte {offset})", kind.tag())]
    UnterminatedLiteralBlock {
        kind: LiteralKind,
        /// 1-based line of the opening tag.
        line: usize,
        /// Byte offset of the opening tag in the input.
        offset: usize,
    },

    /// A sentinel in paragraph text without a well-formed region behind it.
    #[error("malformed verbatim region in paragraph text at byte {offset}")]
    MalformedLiteralRegion {
        /// Byte offset of the sentinel within the paragraph text.
        offset: usize,
    },

    /// List placement tried to descend through a list without children.
    #[error("list at level {level} has no children to descend into")]
    MalformedListState { level: u32 },
}

/// Error from [`parse_file`](crate::parse_file).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}
