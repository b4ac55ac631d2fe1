//! Block-level segmenter.
//!
//! The segmenter is line-oriented and recognizes:
//! - Section headers (`== text ==`)
//! - List items (`  * text`, `  - text`)
//! - Paragraphs (everything else, consecutive lines joined)
//!
//! Input bytes pass through the [`LiteralScanner`](crate::literal::LiteralScanner)
//! in the same pass, so verbatim regions are already sentinel-delimited when
//! a line is classified.

mod raw;
mod segmenter;

pub use raw::{BlockKind, ListItem, RawBlock};
pub use segmenter::{parse_list_item, parse_section_header, BlockSegmenter};

use crate::error::ParseError;

/// Segment `input` into its full block sequence.
pub fn segment(input: &[u8]) -> Result<Vec<RawBlock>, ParseError> {
    let mut segmenter = BlockSegmenter::new(input);
    let mut blocks = Vec::with_capacity((input.len() / 64).max(16));
    segmenter.parse(&mut blocks)?;
    Ok(blocks)
}
