//! Raw block types produced by the segmenter.

/// A list item line, as classified by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    /// Nesting level in 2-space indentation units (at least 1).
    pub level: u32,
    /// `-` marker (ordered) rather than `*` (unordered).
    pub ordered: bool,
    /// A blank line or the start of the document precedes this item, so it
    /// must not continue an earlier list.
    pub force_new_list: bool,
}

/// Kind of a raw block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `== text ==` section header.
    Header {
        /// Number of `=` on each side.
        level: u32,
    },
    /// Indented `*` or `-` item.
    ListItem(ListItem),
    /// Run of plain lines joined with single spaces.
    Paragraph,
}

/// A classified block with its still-unparsed text.
///
/// `text` may contain verbatim sentinels (see [`crate::literal`]); they are
/// resolved by the inline parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Block kind.
    pub kind: BlockKind,
    /// Header text, item text or paragraph text.
    pub text: Vec<u8>,
}

impl RawBlock {
    /// Create a block.
    #[inline]
    pub fn new(kind: BlockKind, text: Vec<u8>) -> Self {
        Self { kind, text }
    }
}
