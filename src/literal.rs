//! Verbatim region scanner.
//!
//! Recognizes `<code>`, `<file>`, `<html>`, `<HTML>` and `<nowiki>` tag
//! boundaries as bytes are appended to a buffer and rewrites them in place to
//! two-byte sentinels. Everything between a start and an end sentinel is
//! left untouched by the block and inline passes.
//!
//! Encoding of a region in the rewritten buffer:
//!
//! ```text
//! 0x00 <start marker> <tag attributes> 0x1F <content> 0x00 <end marker>
//! ```

use crate::error::ParseError;

/// First byte of every sentinel.
pub const SENTINEL: u8 = 0x00;

/// Terminates the attribute text that follows a start sentinel.
pub const ATTR_END: u8 = 0x1F;

/// UTF-8 encoding of U+FFFD, substituted for reserved bytes found in input.
const REPLACEMENT: &[u8] = "\u{FFFD}".as_bytes();

/// Kind of verbatim region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `<code>`: preformatted source.
    Code,
    /// `<file>`: preformatted file contents, optionally named.
    File,
    /// `<html>`: raw inline HTML.
    Html,
    /// `<HTML>`: raw block HTML.
    HtmlBlock,
    /// `<nowiki>`: text exempt from markup.
    NoWiki,
}

impl LiteralKind {
    /// All kinds, in start-tag priority order.
    pub const ALL: [LiteralKind; 5] = [
        LiteralKind::Code,
        LiteralKind::File,
        LiteralKind::Html,
        LiteralKind::HtmlBlock,
        LiteralKind::NoWiki,
    ];

    /// Tag name as written in markup.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::File => "file",
            Self::Html => "html",
            Self::HtmlBlock => "HTML",
            Self::NoWiki => "nowiki",
        }
    }

    /// Second byte of the start sentinel.
    #[inline]
    pub const fn start_marker(self) -> u8 {
        match self {
            Self::Code => 0x11,
            Self::File => 0x13,
            Self::Html => 0x15,
            Self::HtmlBlock => 0x17,
            Self::NoWiki => 0x19,
        }
    }

    /// Second byte of the end sentinel.
    #[inline]
    pub const fn end_marker(self) -> u8 {
        self.start_marker() + 1
    }

    /// Full two-byte end sentinel.
    #[inline]
    pub const fn end_sentinel(self) -> [u8; 2] {
        [SENTINEL, self.end_marker()]
    }

    /// Resolve a kind from the second byte of a start sentinel.
    pub fn from_start_marker(b: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.start_marker() == b)
    }

    fn end_tag(self) -> &'static [u8] {
        match self {
            Self::Code => b"</code>",
            Self::File => b"</file>",
            Self::Html => b"</html>",
            Self::HtmlBlock => b"</HTML>",
            Self::NoWiki => b"</nowiki>",
        }
    }

    /// Maximum number of space-separated attribute tokens the start tag takes.
    fn max_attributes(self) -> usize {
        match self {
            Self::Code => 1,
            Self::File => 2,
            Self::Html | Self::HtmlBlock | Self::NoWiki => 0,
        }
    }
}

/// Position of the currently open region's start tag.
#[derive(Debug, Clone, Copy)]
struct OpenRegion {
    kind: LiteralKind,
    line: usize,
    offset: usize,
}

/// Start tag recognized at the end of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StartTag {
    kind: LiteralKind,
    /// Offset of `<` within the buffer.
    start: usize,
    /// Attribute text range within the buffer.
    attrs: (usize, usize),
}

/// Byte-at-a-time verbatim tag recognizer.
#[derive(Debug, Default)]
pub struct LiteralScanner {
    open: Option<OpenRegion>,
    /// Buffer and input offsets of the last `<` pushed outside a region with
    /// no `>` after it. Only this `<` can begin a start tag.
    tag_start: Option<(usize, usize)>,
}

impl LiteralScanner {
    /// Create a scanner with no region open.
    pub fn new() -> Self {
        Self {
            open: None,
            tag_start: None,
        }
    }

    /// Kind of the region currently open, if any.
    #[inline]
    pub fn open_kind(&self) -> Option<LiteralKind> {
        self.open.map(|r| r.kind)
    }

    /// Whether a verbatim region is open.
    #[inline]
    pub fn in_literal(&self) -> bool {
        self.open.is_some()
    }

    /// Append `b` to `buf`, rewriting a completed start or end tag.
    ///
    /// `offset` and `line` locate `b` in the original input and are only used
    /// for error reporting.
    pub fn push(&mut self, buf: &mut Vec<u8>, b: u8, offset: usize, line: usize) {
        if b == SENTINEL || b == ATTR_END {
            buf.extend_from_slice(REPLACEMENT);
            return;
        }

        buf.push(b);
        match b {
            b'<' if self.open.is_none() => {
                self.tag_start = Some((buf.len() - 1, offset));
                return;
            }
            b'>' => {}
            _ => return,
        }

        match self.open {
            None => {
                // Each `<` is tried against one `>` only
                let Some((start, tag_offset)) = self.tag_start.take() else {
                    return;
                };
                if let Some(tag) = match_start_tag(buf, start) {
                    let attrs = buf[tag.attrs.0..tag.attrs.1].to_vec();
                    buf.truncate(tag.start);
                    buf.push(SENTINEL);
                    buf.push(tag.kind.start_marker());
                    buf.extend_from_slice(&attrs);
                    buf.push(ATTR_END);
                    self.open = Some(OpenRegion {
                        kind: tag.kind,
                        line,
                        offset: tag_offset,
                    });
                }
            }
            Some(region) => {
                let end_tag = region.kind.end_tag();
                if buf.ends_with(end_tag) {
                    buf.truncate(buf.len() - end_tag.len());
                    buf.extend_from_slice(&region.kind.end_sentinel());
                    self.open = None;
                    self.tag_start = None;
                }
            }
        }
    }

    /// Check that no region is left open at end of input.
    pub fn finish(&self) -> Result<(), ParseError> {
        match self.open {
            None => Ok(()),
            Some(region) => Err(ParseError::UnterminatedLiteralBlock {
                kind: region.kind,
                line: region.line,
                offset: region.offset,
            }),
        }
    }
}

/// Match a start tag spanning `buf[start..]`, from `<` to the final `>`.
fn match_start_tag(buf: &[u8], start: usize) -> Option<StartTag> {
    if buf.get(start) != Some(&b'<') {
        return None;
    }
    let inner_start = start + 1;
    let inner_end = buf.len() - 1;
    let inner = &buf[inner_start..inner_end];

    for kind in LiteralKind::ALL {
        let name = kind.tag().as_bytes();
        let Some(rest) = inner.strip_prefix(name) else {
            continue;
        };

        if rest.is_empty() {
            return Some(StartTag {
                kind,
                start,
                attrs: (inner_end, inner_end),
            });
        }

        if rest[0] != b' ' || kind.max_attributes() == 0 {
            continue;
        }

        let attrs_start = inner_start + name.len() + rest.iter().take_while(|&&b| b == b' ').count();
        let attrs = &buf[attrs_start..inner_end];
        let tokens = attrs.split(|&b| b == b' ').filter(|t| !t.is_empty()).count();
        let valid = tokens >= 1
            && tokens <= kind.max_attributes()
            && !attrs.iter().any(|&b| matches!(b, b'\t' | b'\n' | b'\r' | b'<'));
        if valid {
            let attrs_end = attrs_start + attrs.len() - attrs.iter().rev().take_while(|&&b| b == b' ').count();
            return Some(StartTag {
                kind,
                start,
                attrs: (attrs_start, attrs_end),
            });
        }
    }

    None
}
