//! Block segmenter implementation.

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::literal::{LiteralScanner, SENTINEL};

use super::raw::{BlockKind, ListItem, RawBlock};

/// Block segmenter state.
pub struct BlockSegmenter<'a> {
    /// Current cursor position.
    cursor: Cursor<'a>,
    /// Verbatim tag recognizer; sees every input byte once.
    scanner: LiteralScanner,
    /// 1-based number of the last physical line read.
    line_no: usize,
    /// Current logical line (physical lines joined while a region is open).
    line: Vec<u8>,
    /// Accumulated paragraph text.
    paragraph: Vec<u8>,
    /// Whether we're currently in a paragraph.
    in_paragraph: bool,
    /// Whether the previous logical line was blank. True at document start.
    after_blank: bool,
}

impl<'a> BlockSegmenter<'a> {
    /// Create a new segmenter.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            scanner: LiteralScanner::new(),
            line_no: 0,
            line: Vec::with_capacity(128),
            paragraph: Vec::with_capacity(256),
            in_paragraph: false,
            after_blank: true,
        }
    }

    /// Segment the whole input into blocks.
    pub fn parse(&mut self, blocks: &mut Vec<RawBlock>) -> Result<(), ParseError> {
        while !self.cursor.is_eof() {
            self.parse_line(blocks);
        }

        self.scanner.finish()?;

        // Close any open paragraph at end of input
        self.close_paragraph(blocks);
        Ok(())
    }

    /// Read and classify one logical line.
    fn parse_line(&mut self, blocks: &mut Vec<RawBlock>) {
        self.read_logical_line();
        let line = std::mem::take(&mut self.line);

        if is_blank(&line) {
            self.close_paragraph(blocks);
            self.after_blank = true;
        } else if let Some((level, text)) = parse_section_header(&line) {
            self.close_paragraph(blocks);
            blocks.push(RawBlock::new(BlockKind::Header { level }, text.to_vec()));
            self.after_blank = false;
        } else if let Some((level, ordered, text)) = parse_list_item(&line) {
            self.close_paragraph(blocks);
            let item = ListItem {
                level,
                ordered,
                force_new_list: self.after_blank,
            };
            blocks.push(RawBlock::new(BlockKind::ListItem(item), text.to_vec()));
            self.after_blank = false;
        } else {
            self.add_paragraph_line(&line);
            self.after_blank = false;
        }

        self.line = line;
    }

    /// Feed physical lines through the scanner until no verbatim region is
    /// left open (or input ends).
    fn read_logical_line(&mut self) {
        self.line.clear();
        loop {
            let start = self.cursor.offset();
            self.line_no += 1;
            let physical = self.cursor.consume_line();
            for (i, &b) in physical.iter().enumerate() {
                self.scanner.push(&mut self.line, b, start + i, self.line_no);
            }

            if !self.scanner.in_literal() || self.cursor.is_eof() {
                break;
            }
            // Verbatim content keeps its line breaks
            self.line.push(b'\n');
        }
    }

    fn add_paragraph_line(&mut self, line: &[u8]) {
        let text = trim_spaces(line);
        if self.in_paragraph {
            self.paragraph.push(b' ');
        } else {
            self.in_paragraph = true;
            self.paragraph.clear();
        }
        self.paragraph.extend_from_slice(text);
    }

    fn close_paragraph(&mut self, blocks: &mut Vec<RawBlock>) {
        if self.in_paragraph {
            self.in_paragraph = false;
            blocks.push(RawBlock::new(BlockKind::Paragraph, self.paragraph.clone()));
        }
    }
}

#[inline]
fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| is_space(b))
}

fn trim_spaces(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|&b| !is_space(b)).unwrap_or(line.len());
    let end = line.iter().rposition(|&b| !is_space(b)).map_or(start, |p| p + 1);
    &line[start..end]
}

/// Parse `^(=+)([^=]+)(=+)$` (after trailing space/tab trimming) with equal
/// delimiter runs. Returns the level and the trimmed header text.
pub fn parse_section_header(line: &[u8]) -> Option<(u32, &[u8])> {
    let end = line.iter().rposition(|&b| !is_space(b))? + 1;
    let line = &line[..end];

    // Headers are plain text; verbatim regions disqualify the line
    if line.contains(&SENTINEL) {
        return None;
    }

    let open = line.iter().take_while(|&&b| b == b'=').count();
    if open == 0 || open == line.len() {
        return None;
    }
    let close = line.iter().rev().take_while(|&&b| b == b'=').count();
    if open != close {
        return None;
    }

    let middle = &line[open..line.len() - close];
    if middle.is_empty() || middle.contains(&b'=') {
        return None;
    }

    Some((open as u32, trim_spaces(middle)))
}

/// Parse `^((  )+)([*-]) (.*)$`. Returns the level in 2-space units, whether
/// the marker is `-` (ordered), and the trimmed item text.
pub fn parse_list_item(line: &[u8]) -> Option<(u32, bool, &[u8])> {
    let mut cursor = Cursor::new(line);
    let indent = cursor.skip_spaces();
    if indent < 2 || indent % 2 != 0 {
        return None;
    }

    let ordered = match cursor.next()? {
        b'-' => true,
        b'*' => false,
        _ => return None,
    };
    if !cursor.at(b' ') {
        return None;
    }
    cursor.bump();

    Some(((indent / 2) as u32, ordered, trim_spaces(cursor.remaining_slice())))
}
