//! Link and media markup parsing.
//!
//! Both take the bytes between the bracket pairs (`[[...]]`, `{{...}}`);
//! locating the brackets is the inline scanner's job.

use memchr::memchr;

use super::node::{Align, Inline, MediaKind};

/// Parse the inside of `[[...]]`.
///
/// `target|text` gives an external-style link with display text; a bare
/// `page` is both target and text and is internal unless it carries a URL
/// scheme.
pub fn parse_link(inner: &[u8]) -> Inline {
    match memchr(b'|', inner) {
        Some(pipe) => Inline::Link {
            target: lossy_trimmed(&inner[..pipe]),
            text: lossy_trimmed(&inner[pipe + 1..]),
            internal: false,
        },
        None => {
            let target = lossy_trimmed(inner);
            let internal = !has_scheme(target.as_bytes());
            Inline::Link {
                text: target.clone(),
                target,
                internal,
            }
        }
    }
}

/// Parse the inside of `{{...}}`.
pub fn parse_media(inner: &[u8]) -> Inline {
    let (body, title) = match memchr(b'|', inner) {
        Some(pipe) => {
            let title = lossy_trimmed(&inner[pipe + 1..]);
            (&inner[..pipe], (!title.is_empty()).then_some(title))
        }
        None => (inner, None),
    };

    let align = media_alignment(body);
    let body = trim(body);

    let (resource, params) = match memchr(b'?', body) {
        Some(q) => (&body[..q], Some(&body[q + 1..])),
        None => (body, None),
    };
    let (width, height) = params.map(parse_dimensions).unwrap_or((None, None));

    let resource = String::from_utf8_lossy(resource).into_owned();
    let kind = MediaKind::from_resource(&resource);
    Inline::Media {
        resource,
        width,
        height,
        align,
        title,
        kind,
    }
}

/// Leading space → left, trailing space → right, both or neither → center.
/// An empty body is centered.
fn media_alignment(body: &[u8]) -> Align {
    let (Some(&first), Some(&last)) = (body.first(), body.last()) else {
        return Align::Center;
    };
    match (first == b' ', last == b' ') {
        (true, false) => Align::Left,
        (false, true) => Align::Right,
        _ => Align::Center,
    }
}

/// Parse `W`, `WxH` (or `xH`) from media parameters. Further `&`-separated
/// flags are ignored. Each number that fails to parse is `None` on its own;
/// the other one is kept.
fn parse_dimensions(params: &[u8]) -> (Option<u64>, Option<u64>) {
    let size = match memchr(b'&', params) {
        Some(amp) => &params[..amp],
        None => params,
    };
    match memchr(b'x', size) {
        Some(x) => (parse_u64(&size[..x]), parse_u64(&size[x + 1..])),
        None => (parse_u64(size), None),
    }
}

fn parse_u64(digits: &[u8]) -> Option<u64> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// Whether `target` starts with `scheme://` or `mailto:`.
pub fn has_scheme(target: &[u8]) -> bool {
    if target.starts_with(b"mailto:") {
        return true;
    }
    let Some(colon) = memchr(b':', target) else {
        return false;
    };
    let scheme = &target[..colon];
    !scheme.is_empty()
        && scheme[0].is_ascii_alphabetic()
        && scheme
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.')
        && target[colon..].starts_with(b"://")
}

fn trim(bytes: &[u8]) -> &[u8] {
    bytes.trim_ascii()
}

fn lossy_trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim(bytes)).into_owned()
}
