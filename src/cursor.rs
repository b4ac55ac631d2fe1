//! Byte cursor shared by the block and inline scanners.
//!
//! Index-based over a borrowed slice; all lookahead is bounds-checked and
//! returns `None` past the end.

/// A cursor for byte-by-byte scanning.
///
/// # Example
/// ```
/// use dokutree::cursor::Cursor;
///
/// let input = b"**bold**";
/// let mut cursor = Cursor::new(input);
///
/// assert!(cursor.at_pair(b'*'));
/// cursor.advance(2);
/// assert_eq!(cursor.peek(), Some(b'b'));
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor over a byte slice.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Check if cursor is at end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte n positions ahead.
    #[inline]
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.get(self.pos + n).copied()
    }

    /// Peek at the byte before the cursor.
    #[inline]
    pub fn peek_behind(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|i| self.input[i])
    }

    /// Advance by n bytes, clamped to the end of input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Advance by 1 byte.
    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    /// Consume and return current byte.
    #[inline]
    pub fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Check if current position matches a byte.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Check if the next two bytes are both `b`.
    #[inline]
    pub fn at_pair(&self, b: u8) -> bool {
        self.at(b) && self.peek_ahead(1) == Some(b)
    }

    /// Skip while predicate is true.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip spaces only.
    #[inline]
    pub fn skip_spaces(&mut self) -> usize {
        self.skip_while(|b| b == b' ')
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Find the next occurrence of a byte, relative to the cursor.
    #[inline]
    pub fn find(&self, needle: u8) -> Option<usize> {
        memchr::memchr(needle, self.remaining_slice())
    }

    /// Find the next occurrence of a byte sequence, relative to the cursor.
    #[inline]
    pub fn find_bytes(&self, needle: &[u8]) -> Option<usize> {
        memchr::memmem::find(self.remaining_slice(), needle)
    }

    /// Advance past the next newline, returning the line without it.
    ///
    /// A trailing `\r` is stripped as well.
    #[inline]
    pub fn consume_line(&mut self) -> &'a [u8] {
        let rest = self.remaining_slice();
        let line = match self.find(b'\n') {
            Some(pos) => {
                self.pos += pos + 1;
                &rest[..pos]
            }
            None => {
                self.pos = self.input.len();
                rest
            }
        };
        line.strip_suffix(b"\r").unwrap_or(line)
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset())
            .field("remaining", &self.remaining())
            .finish()
    }
}
