//! dokutree: DokuWiki-flavored wiki markup to a document tree
//!
//! The pipeline runs in stages, each fully consuming the previous one:
//! 1. Literal-region scanning and block segmentation (one pass over bytes)
//! 2. Tree assembly (sections, nested lists, paragraphs)
//! 3. Inline parsing of every paragraph
//! 4. Bare URL fixup
//!
//! # Design Principles
//! - No regex: pure byte-level scanning
//! - No backtracking: each stage is a single forward pass
//! - Arena tree: nodes refer to each other by [`NodeId`]
//!
//! # Example
//! ```
//! let doc = dokutree::parse(b"== Hello ==\n\nSome **bold** text", "page").unwrap();
//! assert_eq!(doc.top_level().len(), 2);
//! assert!(dokutree::to_html(&doc).contains("<strong>bold</strong>"));
//! ```

pub mod block;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod inline;
pub mod literal;
pub mod render;
pub mod tree;

use std::path::Path;

// Re-export primary types
pub use block::{BlockKind, BlockSegmenter, ListItem, RawBlock};
pub use error::{Error, ParseError};
pub use inline::{Align, Effects, Inline, InlineParser, MediaKind};
pub use literal::LiteralKind;
pub use render::{render, render_with_options, to_html, to_html_with_options, HtmlWriter};
pub use tree::{Document, Node, NodeId, NodeKind, TreeAssembler};

/// Parsing/rendering options.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Split bare `http`/`https`/`ftp` URLs out of text into links.
    pub fixup_links: bool,
    /// Give rendered section headers a slug `id` attribute.
    pub heading_ids: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fixup_links: true,
            heading_ids: true,
        }
    }
}

/// Parse wiki markup into a document titled `title`.
pub fn parse(content: &[u8], title: &str) -> Result<Document, ParseError> {
    parse_with_options(content, title, &Options::default())
}

/// Parse wiki markup with options.
pub fn parse_with_options(
    content: &[u8],
    title: &str,
    options: &Options,
) -> Result<Document, ParseError> {
    let blocks = block::segment(content)?;
    tracing::debug!(bytes = content.len(), blocks = blocks.len(), "segmented input");

    let mut assembler = TreeAssembler::new(title);
    for block in blocks {
        assembler.push_block(block)?;
    }
    assembler.finish(options)
}

/// Read and parse a wiki page. The title is the file's base name.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, Error> {
    parse_file_with_options(path, &Options::default())
}

/// Read and parse a wiki page with options.
pub fn parse_file_with_options(
    path: impl AsRef<Path>,
    options: &Options,
) -> Result<Document, Error> {
    let path = path.as_ref();
    let content = std::fs::read(path).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to read page");
    })?;
    let title = title_for(path);
    let doc = parse_with_options(&content, &title, options).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to parse page");
    })?;
    Ok(doc)
}

/// Final path component, lossily decoded.
fn title_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
