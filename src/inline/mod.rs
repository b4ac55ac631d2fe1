//! Inline parser for wiki markup.
//!
//! Single left-to-right pass with bounded lookahead:
//! - Doubled delimiters (`**`, `//`, `__`, ``` `` ```) toggle bits in the
//!   current [`Effects`] mask; text between toggles becomes one
//!   [`Inline::StyledText`]
//! - `[[...]]` and `{{...}}` become links and media, resetting the mask
//! - Verbatim sentinels become [`Inline::Literal`], resetting the mask
//!
//! Unmatched delimiters and unclosed brackets are plain text. An effect still
//! open at the end of the paragraph simply ends there.

mod fixup;
mod links;
pub mod node;

pub use fixup::{find_url, fixup_links};
pub use links::{has_scheme, parse_link, parse_media};
pub use node::{Align, Effects, Inline, MediaKind};

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::literal::{LiteralKind, ATTR_END, SENTINEL};

/// Inline parser state.
pub struct InlineParser {
    /// Pending text for the next styled run.
    buf: Vec<u8>,
}

impl InlineParser {
    /// Create a new inline parser.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(128),
        }
    }

    /// Parse one paragraph's raw text, appending nodes to `out`.
    pub fn parse(&mut self, text: &[u8], out: &mut Vec<Inline>) -> Result<(), ParseError> {
        self.buf.clear();
        let mut effects = Effects::NONE;
        let mut cursor = Cursor::new(text);
        // Opening pairs before these offsets have no usable close
        let mut link_miss = 0;
        let mut media_miss = 0;

        while let Some(b) = cursor.peek() {
            match b {
                SENTINEL => {
                    self.flush(effects, out);
                    effects = Effects::NONE;
                    out.push(parse_literal(&mut cursor)?);
                }
                b'*' | b'/' | b'_' | b'`' if cursor.at_pair(b) && !is_scheme_slashes(&cursor, b) => {
                    self.flush(effects, out);
                    if let Some(effect) = Effects::for_delimiter(b) {
                        effects.toggle(effect);
                    }
                    cursor.advance(2);
                }
                b'[' if cursor.at_pair(b'[') => match find_closing(&cursor, b"]]", &mut link_miss) {
                    Some(len) => {
                        self.flush(effects, out);
                        effects = Effects::NONE;
                        let start = cursor.offset() + 2;
                        out.push(parse_link(&text[start..start + len]));
                        cursor.advance(len + 4);
                    }
                    None => self.push_byte(&mut cursor, b),
                },
                b'{' if cursor.at_pair(b'{') => match find_closing(&cursor, b"}}", &mut media_miss) {
                    Some(len) => {
                        self.flush(effects, out);
                        effects = Effects::NONE;
                        let start = cursor.offset() + 2;
                        out.push(parse_media(&text[start..start + len]));
                        cursor.advance(len + 4);
                    }
                    None => self.push_byte(&mut cursor, b),
                },
                _ => self.push_byte(&mut cursor, b),
            }
        }

        self.flush(effects, out);
        Ok(())
    }

    #[inline]
    fn push_byte(&mut self, cursor: &mut Cursor<'_>, b: u8) {
        self.buf.push(b);
        cursor.bump();
    }

    /// Emit buffered text as a styled run under `effects`.
    fn flush(&mut self, effects: Effects, out: &mut Vec<Inline>) {
        if !self.buf.is_empty() {
            out.push(Inline::styled(effects, String::from_utf8_lossy(&self.buf)));
            self.buf.clear();
        }
    }
}

impl Default for InlineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `//` right after `:` belongs to a URL scheme, not to an italic toggle.
#[inline]
fn is_scheme_slashes(cursor: &Cursor<'_>, b: u8) -> bool {
    b == b'/' && cursor.peek_behind() == Some(b':')
}

/// Length of the content between the opening pair at the cursor and the
/// next `close`. Content may not cross a verbatim region.
///
/// On a miss, `miss` is raised to the offset below which every later opening
/// pair misses too: the end of text when no `close` follows, otherwise the
/// sentinel in the way.
fn find_closing(cursor: &Cursor<'_>, close: &[u8], miss: &mut usize) -> Option<usize> {
    let at = cursor.offset();
    if at < *miss {
        return None;
    }
    let rest = &cursor.remaining_slice()[2..];
    let Some(len) = memchr::memmem::find(rest, close) else {
        *miss = usize::MAX;
        return None;
    };
    if let Some(sentinel) = memchr::memchr(SENTINEL, &rest[..len]) {
        *miss = at + 2 + sentinel;
        return None;
    }
    Some(len)
}

/// Decode a sentinel-delimited verbatim region at the cursor.
fn parse_literal(cursor: &mut Cursor<'_>) -> Result<Inline, ParseError> {
    let offset = cursor.offset();
    let malformed = ParseError::MalformedLiteralRegion { offset };

    let kind = cursor
        .peek_ahead(1)
        .and_then(LiteralKind::from_start_marker)
        .ok_or(malformed.clone())?;
    cursor.advance(2);

    let attrs_len = cursor.find(ATTR_END).ok_or(malformed.clone())?;
    let attrs = &cursor.remaining_slice()[..attrs_len];
    cursor.advance(attrs_len + 1);

    let end = kind.end_sentinel();
    let text_len = cursor.find_bytes(&end).ok_or(malformed)?;
    let text = String::from_utf8_lossy(&cursor.remaining_slice()[..text_len]).into_owned();
    cursor.advance(text_len + end.len());

    let mut tokens = attrs
        .split(|&b| b == b' ')
        .filter(|t| !t.is_empty())
        .map(|t| String::from_utf8_lossy(t).into_owned());
    let language = tokens.next().filter(|lang| lang != "-");
    let filename = tokens.next();

    Ok(Inline::Literal {
        kind,
        text,
        language,
        filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_inline(text: &[u8]) -> Vec<Inline> {
        let mut parser = InlineParser::new();
        let mut out = Vec::new();
        parser.parse(text, &mut out).unwrap();
        out
    }

    fn region(kind: LiteralKind, attrs: &[u8], body: &[u8]) -> Vec<u8> {
        let mut bytes = vec![SENTINEL, kind.start_marker()];
        bytes.extend_from_slice(attrs);
        bytes.push(ATTR_END);
        bytes.extend_from_slice(body);
        bytes.extend_from_slice(&kind.end_sentinel());
        bytes
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline(b"hello world"), vec![Inline::text("hello world")]);
    }

    #[test]
    fn test_bold_toggle() {
        assert_eq!(
            parse_inline(b"**bold** plain **bold again**"),
            vec![
                Inline::styled(Effects::BOLD, "bold"),
                Inline::text(" plain "),
                Inline::styled(Effects::BOLD, "bold again"),
            ]
        );
    }

    #[test]
    fn test_nested_effects() {
        assert_eq!(
            parse_inline(b"**//both//**"),
            vec![Inline::styled(Effects::BOLD | Effects::ITALIC, "both")]
        );
    }

    #[test]
    fn test_all_delimiters() {
        let nodes = parse_inline(b"__u__ ``m`` //i//");
        assert_eq!(nodes[0], Inline::styled(Effects::UNDERLINE, "u"));
        assert_eq!(nodes[2], Inline::styled(Effects::MONOSPACE, "m"));
        assert_eq!(nodes[4], Inline::styled(Effects::ITALIC, "i"));
    }

    #[test]
    fn test_lone_delimiter_is_text() {
        assert_eq!(parse_inline(b"a * b / c _ d"), vec![Inline::text("a * b / c _ d")]);
    }

    #[test]
    fn test_unterminated_effect_closes_at_end() {
        assert_eq!(
            parse_inline(b"x **open"),
            vec![Inline::text("x "), Inline::styled(Effects::BOLD, "open")]
        );
    }

    #[test]
    fn test_scheme_slashes_not_italic() {
        assert_eq!(
            parse_inline(b"see http://example.com now"),
            vec![Inline::text("see http://example.com now")]
        );
    }

    #[test]
    fn test_link_resets_effects() {
        assert_eq!(
            parse_inline(b"**a [[page]] b"),
            vec![
                Inline::styled(Effects::BOLD, "a "),
                Inline::Link {
                    target: "page".into(),
                    text: "page".into(),
                    internal: true,
                },
                Inline::text(" b"),
            ]
        );
    }

    #[test]
    fn test_unclosed_link_is_text() {
        assert_eq!(parse_inline(b"[[nope"), vec![Inline::text("[[nope")]);
    }

    #[test]
    fn test_media() {
        let nodes = parse_inline(b"{{ image.png?200x100|Caption}}");
        assert_eq!(
            nodes,
            vec![Inline::Media {
                resource: "image.png".into(),
                width: Some(200),
                height: Some(100),
                align: Align::Left,
                title: Some("Caption".into()),
                kind: MediaKind::Image,
            }]
        );
    }

    #[test]
    fn test_literal_region() {
        let mut text = b"**a".to_vec();
        text.extend(region(LiteralKind::Code, b"rust", b"**not bold**"));
        text.extend_from_slice(b"b");
        assert_eq!(
            parse_inline(&text),
            vec![
                Inline::styled(Effects::BOLD, "a"),
                Inline::Literal {
                    kind: LiteralKind::Code,
                    text: "**not bold**".into(),
                    language: Some("rust".into()),
                    filename: None,
                },
                Inline::text("b"),
            ]
        );
    }

    #[test]
    fn test_file_attributes() {
        let text = region(LiteralKind::File, b"- notes.txt", b"x\ny");
        assert_eq!(
            parse_inline(&text),
            vec![Inline::Literal {
                kind: LiteralKind::File,
                text: "x\ny".into(),
                language: None,
                filename: Some("notes.txt".into()),
            }]
        );
    }

    #[test]
    fn test_link_cannot_cross_literal() {
        let mut text = b"[[a".to_vec();
        text.extend(region(LiteralKind::NoWiki, b"", b"]]"));
        let nodes = parse_inline(&text);
        assert_eq!(nodes[0], Inline::text("[[a"));
        assert!(matches!(nodes[1], Inline::Literal { kind: LiteralKind::NoWiki, .. }));
    }

    #[test]
    fn test_unclosed_opens_then_link_after_literal() {
        let mut text = b"[[a [[b {{c ".to_vec();
        text.extend(region(LiteralKind::NoWiki, b"", b"x"));
        text.extend_from_slice(b" [[d]] {{e.png}}");
        let nodes = parse_inline(&text);
        assert_eq!(nodes[0], Inline::text("[[a [[b {{c "));
        assert!(matches!(nodes[1], Inline::Literal { kind: LiteralKind::NoWiki, .. }));
        assert_eq!(nodes[2], Inline::text(" "));
        assert_eq!(
            nodes[3],
            Inline::Link {
                target: "d".into(),
                text: "d".into(),
                internal: true,
            }
        );
        assert!(matches!(&nodes[5], Inline::Media { resource, .. } if resource == "e.png"));
    }

    #[test]
    fn test_many_unclosed_opens_are_text() {
        let text = b"[[".repeat(10_000);
        let nodes = parse_inline(&text);
        assert_eq!(nodes, vec![Inline::text("[[".repeat(10_000))]);
    }

    #[test]
    fn test_missing_end_sentinel() {
        let mut text = b"ab".to_vec();
        text.extend_from_slice(&[SENTINEL, LiteralKind::Html.start_marker(), ATTR_END]);
        text.extend_from_slice(b"<b>");
        let mut parser = InlineParser::new();
        let mut out = Vec::new();
        assert_eq!(
            parser.parse(&text, &mut out),
            Err(ParseError::MalformedLiteralRegion { offset: 2 })
        );
    }

    #[test]
    fn test_stray_end_sentinel() {
        let text = LiteralKind::Code.end_sentinel();
        let mut parser = InlineParser::new();
        let mut out = Vec::new();
        assert_eq!(
            parser.parse(&text, &mut out),
            Err(ParseError::MalformedLiteralRegion { offset: 0 })
        );
    }
}
