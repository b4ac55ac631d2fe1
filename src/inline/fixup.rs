//! Bare URL detection in styled text.
//!
//! Runs after inline parsing: any `http://`, `https://` or `ftp://` URL
//! inside a [`Inline::StyledText`] node is split out into its own
//! [`Inline::Link`]. The pass repeats until no text node contains a URL,
//! so running it twice changes nothing.

use memchr::memmem;
use smallvec::SmallVec;

use super::node::Inline;

/// Recognized URL schemes. `https` precedes `http` so the longer one wins.
const SCHEMES: [&[u8]; 3] = [b"https", b"http", b"ftp"];

/// Bytes allowed in a URL after the scheme (RFC 3986 unreserved, reserved
/// and `%`).
static URL_CHARS: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0;
    while i < 256 {
        let b = i as u8;
        table[i] = b.is_ascii_alphanumeric()
            || matches!(
                b,
                b'-' | b'.'
                    | b'_'
                    | b'~'
                    | b':'
                    | b'/'
                    | b'?'
                    | b'#'
                    | b'['
                    | b']'
                    | b'@'
                    | b'!'
                    | b'$'
                    | b'&'
                    | b'\''
                    | b'('
                    | b')'
                    | b'*'
                    | b'+'
                    | b','
                    | b';'
                    | b'='
                    | b'%'
            );
        i += 1;
    }
    table
};

/// Trailing bytes that end a sentence rather than a URL.
#[inline]
fn is_trailing_punct(b: u8) -> bool {
    matches!(b, b'.' | b',' | b':' | b';' | b'!' | b'?' | b'\'' | b'"')
}

/// Find the first bare URL in `text`, returning its byte range.
pub fn find_url(text: &[u8]) -> Option<(usize, usize)> {
    for sep in memmem::find_iter(text, b"://") {
        let Some(start) = scheme_start(text, sep) else {
            continue;
        };

        let mut end = sep + 3;
        while end < text.len() && URL_CHARS[text[end] as usize] {
            end += 1;
        }
        end = trim_url_end(&text[start..end]) + start;

        if end > sep + 3 {
            return Some((start, end));
        }
    }
    None
}

/// Start of the scheme ending at `sep`, if it is one we link and it begins
/// at a word boundary.
fn scheme_start(text: &[u8], sep: usize) -> Option<usize> {
    let before = &text[..sep];
    let scheme = SCHEMES
        .iter()
        .find(|s| before.len() >= s.len() && before[sep - s.len()..].eq_ignore_ascii_case(s))?;
    let start = sep - scheme.len();
    match start.checked_sub(1).map(|i| text[i]) {
        Some(prev) if prev.is_ascii_alphanumeric() => None,
        _ => Some(start),
    }
}

/// Length of `url` after dropping trailing punctuation and unbalanced `)`.
fn trim_url_end(url: &[u8]) -> usize {
    let mut end = url.len();
    loop {
        match url[..end].last() {
            Some(&b) if is_trailing_punct(b) => end -= 1,
            Some(&b')') => {
                let open = url[..end].iter().filter(|&&b| b == b'(').count();
                let close = url[..end].iter().filter(|&&b| b == b')').count();
                if close > open {
                    end -= 1;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    end
}

/// Split bare URLs out of text nodes. Returns the number of links created.
///
/// Text before a URL is kept when it is not blank after trimming; text after
/// it is kept when not blank. Both keep their original effects.
pub fn fixup_links(inlines: &mut Vec<Inline>) -> usize {
    let mut created = 0;
    let mut from = 0;

    while let Some((idx, start, end)) = next_url(inlines, from) {
        let Inline::StyledText { effects, text } = &inlines[idx] else {
            break;
        };
        let effects = *effects;
        let before = &text[..start];
        let url = &text[start..end];
        let after = &text[end..];

        let mut pieces: SmallVec<[Inline; 3]> = SmallVec::new();
        if !before.trim().is_empty() {
            pieces.push(Inline::styled(effects, before));
        }
        pieces.push(Inline::url(url));
        let tail = !after.trim().is_empty();
        if tail {
            pieces.push(Inline::styled(effects, after));
        }

        // Resume at the tail, which may hold further URLs
        from = idx + pieces.len() - usize::from(tail);
        inlines.splice(idx..=idx, pieces);
        created += 1;
    }

    if created > 0 {
        tracing::trace!(created, "split bare urls into links");
    }
    created
}

/// First text node at or after `from` that contains a URL.
fn next_url(inlines: &[Inline], from: usize) -> Option<(usize, usize, usize)> {
    inlines
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(idx, inline)| match inline {
            Inline::StyledText { text, .. } => {
                find_url(text.as_bytes()).map(|(start, end)| (idx, start, end))
            }
            _ => None,
        })
}
