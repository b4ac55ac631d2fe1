//! HTML rendering of a [`Document`].
//!
//! [`HtmlWriter`] owns the output buffer and knows the tag shapes; the
//! renderer walks the tree and decides which tags to write.

use std::collections::{HashMap, HashSet};
use std::io;

use rustc_hash::FxBuildHasher as FastHashBuilder;

use crate::escape;
use crate::inline::{has_scheme, Effects, Inline, MediaKind};
use crate::literal::LiteralKind;
use crate::tree::{Document, NodeId, NodeKind};
use crate::Options;

/// HTML output writer with pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use dokutree::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity(64);
/// writer.write_str("<p>");
/// writer.write_escaped_text(b"Hello <World>");
/// writer.write_str("</p>");
///
/// let html = writer.into_string();
/// assert_eq!(html, "<p>Hello &lt;World&gt;</p>");
/// ```
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Create with explicit capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Write raw bytes without escaping.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text with HTML escaping (for text content).
    #[inline]
    pub fn write_escaped_text(&mut self, text: &[u8]) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write a double-quoted attribute value.
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &str) {
        html_escape::encode_double_quoted_attribute_to_vec(attr, &mut self.out);
    }

    /// Write a URL for an `href`/`src` attribute.
    #[inline]
    pub fn write_url(&mut self, url: &str) {
        escape::url_encode_then_html_escape(&mut self.out, url.as_bytes());
    }

    /// Write ` name="value"` with the value escaped.
    pub fn attr(&mut self, name: &'static str, value: &str) {
        self.write_byte(b' ');
        self.write_str(name);
        self.write_str("=\"");
        self.write_escaped_attr(value);
        self.write_byte(b'"');
    }

    /// Write ` name="N"`.
    pub fn attr_u64(&mut self, name: &'static str, value: u64) {
        self.write_byte(b' ');
        self.write_str(name);
        self.write_str("=\"");
        self.write_u64(value);
        self.write_byte(b'"');
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    /// Take ownership as String.
    pub fn into_string(self) -> String {
        // Only tags and text from `String`s are written, so this is UTF-8
        String::from_utf8(self.out)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    // --- Common HTML Elements ---

    /// Write paragraph start: `<p>`
    #[inline]
    pub fn paragraph_start(&mut self) {
        self.write_str("<p>");
    }

    /// Write paragraph end: `</p>\n`
    #[inline]
    pub fn paragraph_end(&mut self) {
        self.write_str("</p>\n");
    }

    /// Write heading start: `<hN>` or `<hN id="...">`
    #[inline]
    pub fn heading_start(&mut self, level: u8, id: Option<&str>) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("<h");
        self.write_byte(b'0' + level);
        if let Some(id) = id {
            self.attr("id", id);
        }
        self.write_byte(b'>');
    }

    /// Write heading end: `</hN>\n`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("</h");
        self.write_byte(b'0' + level);
        self.write_str(">\n");
    }

    /// Write `<pre class="code lang">`.
    pub fn pre_start(&mut self, class: &'static str, lang: Option<&str>) {
        self.write_str("<pre class=\"");
        self.write_str(class);
        if let Some(lang) = lang {
            self.write_byte(b' ');
            self.write_escaped_attr(lang);
        }
        self.write_str("\">");
    }

    /// Write `</pre>\n`
    #[inline]
    pub fn pre_end(&mut self) {
        self.write_str("</pre>\n");
    }

    /// Write list start: `<ul>\n` or `<ol>\n`
    #[inline]
    pub fn list_start(&mut self, ordered: bool) {
        self.write_str(if ordered { "<ol>\n" } else { "<ul>\n" });
    }

    /// Write list end: `</ul>\n` or `</ol>\n`
    #[inline]
    pub fn list_end(&mut self, ordered: bool) {
        self.write_str(if ordered { "</ol>\n" } else { "</ul>\n" });
    }

    /// Write list item start: `<li>`
    #[inline]
    pub fn li_start(&mut self) {
        self.write_str("<li>");
    }

    /// Write list item end: `</li>\n`
    #[inline]
    pub fn li_end(&mut self) {
        self.write_str("</li>\n");
    }

    /// Open the tags for `effects`, outermost first.
    pub fn effects_start(&mut self, effects: Effects) {
        for (effect, open, _) in EFFECT_TAGS {
            if effects.contains(effect) {
                self.write_str(open);
            }
        }
    }

    /// Close the tags for `effects`, innermost first.
    pub fn effects_end(&mut self, effects: Effects) {
        for &(effect, _, close) in EFFECT_TAGS.iter().rev() {
            if effects.contains(effect) {
                self.write_str(close);
            }
        }
    }

    /// Write link start: `<a href="url" class="...">`
    #[inline]
    pub fn link_start(&mut self, href: &str, class: &'static str) {
        self.write_str("<a href=\"");
        self.write_url(href);
        self.write_str("\" class=\"");
        self.write_str(class);
        self.write_str("\">");
    }

    /// Write link end: `</a>`
    #[inline]
    pub fn link_end(&mut self) {
        self.write_str("</a>");
    }

    /// Write a u64 as decimal.
    fn write_u64(&mut self, mut n: u64) {
        if n == 0 {
            self.write_byte(b'0');
            return;
        }

        let mut buf = [0u8; 20]; // Max digits for u64
        let mut i = buf.len();

        while n > 0 {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }

        self.write_bytes(&buf[i..]);
    }
}

/// Effect bit, opening tag, closing tag.
const EFFECT_TAGS: [(Effects, &str, &str); 4] = [
    (Effects::BOLD, "<strong>", "</strong>"),
    (Effects::ITALIC, "<em>", "</em>"),
    (Effects::UNDERLINE, "<u>", "</u>"),
    (Effects::MONOSPACE, "<code>", "</code>"),
];

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `doc` as HTML into `sink`.
pub fn render<W: io::Write + ?Sized>(doc: &Document, sink: &mut W) -> io::Result<()> {
    render_with_options(doc, sink, &Options::default())
}

/// Render `doc` as HTML into `sink` with options.
pub fn render_with_options<W: io::Write + ?Sized>(
    doc: &Document,
    sink: &mut W,
    options: &Options,
) -> io::Result<()> {
    sink.write_all(to_html_with_options(doc, options).as_bytes())
}

/// Render `doc` as an HTML string.
pub fn to_html(doc: &Document) -> String {
    to_html_with_options(doc, &Options::default())
}

/// Render `doc` as an HTML string with options.
pub fn to_html_with_options(doc: &Document, options: &Options) -> String {
    let mut renderer = Renderer {
        doc,
        writer: HtmlWriter::with_capacity(doc.len() * 32),
        ids: HeadingIds::default(),
        heading_ids: options.heading_ids,
    };
    for &id in doc.top_level() {
        renderer.block(id);
    }
    renderer.writer.into_string()
}

struct Renderer<'a> {
    doc: &'a Document,
    writer: HtmlWriter,
    ids: HeadingIds,
    heading_ids: bool,
}

impl Renderer<'_> {
    fn block(&mut self, id: NodeId) {
        let doc = self.doc;
        match doc.node(id).kind() {
            NodeKind::SectionHeader { level, text } => self.heading(*level, text),
            NodeKind::List { ordered, .. } => self.list(id, *ordered),
            NodeKind::Paragraph { .. } => self.paragraph(id),
            NodeKind::Inline(inline) => self.inline(inline),
            NodeKind::Document { .. } => {
                for &child in doc.children(id) {
                    self.block(child);
                }
            }
        }
    }

    /// More `=` means a more important heading: six or more is `<h1>`, one
    /// is `<h6>`.
    fn heading(&mut self, level: u32, text: &str) {
        let tag = (7 - level.min(6)) as u8;
        let id = self.heading_ids.then(|| self.ids.assign(text));
        self.writer.heading_start(tag, id.as_deref());
        self.writer.write_escaped_text(text.as_bytes());
        self.writer.heading_end(tag);
    }

    /// Nested lists go inside the item before them.
    fn list(&mut self, id: NodeId, ordered: bool) {
        let doc = self.doc;
        self.writer.list_start(ordered);
        let mut item_open = false;
        for &child in doc.children(id) {
            match doc.node(child).kind() {
                NodeKind::List { ordered, .. } => {
                    if item_open {
                        self.writer.newline();
                    } else {
                        self.writer.li_start();
                        item_open = true;
                    }
                    self.list(child, *ordered);
                }
                _ => {
                    if item_open {
                        self.writer.li_end();
                    }
                    self.writer.li_start();
                    self.inlines(child);
                    item_open = true;
                }
            }
        }
        if item_open {
            self.writer.li_end();
        }
        self.writer.list_end(ordered);
    }

    fn paragraph(&mut self, id: NodeId) {
        if self.is_block_literal(id) {
            self.inlines(id);
            return;
        }
        self.writer.paragraph_start();
        self.inlines(id);
        self.writer.paragraph_end();
    }

    /// A paragraph holding nothing but one code, file or `<HTML>` region is
    /// written without `<p>`.
    fn is_block_literal(&self, id: NodeId) -> bool {
        let mut inlines = self.doc.inlines(id);
        matches!(
            (inlines.next(), inlines.next()),
            (
                Some(Inline::Literal {
                    kind: LiteralKind::Code | LiteralKind::File | LiteralKind::HtmlBlock,
                    ..
                }),
                None
            )
        )
    }

    fn inlines(&mut self, paragraph: NodeId) {
        let doc = self.doc;
        for &child in doc.children(paragraph) {
            self.block(child);
        }
    }

    fn inline(&mut self, inline: &Inline) {
        let w = &mut self.writer;
        match inline {
            Inline::StyledText { effects, text } => {
                w.effects_start(*effects);
                w.write_escaped_text(text.as_bytes());
                w.effects_end(*effects);
            }
            Inline::Link {
                target,
                text,
                internal,
            } => {
                if *internal || !has_scheme(target.as_bytes()) {
                    w.link_start(&format!("?id={target}"), "wikilink1");
                } else if is_linkable(target) {
                    w.link_start(target, "urlextern");
                } else {
                    w.write_escaped_text(text.as_bytes());
                    return;
                }
                w.write_escaped_text(text.as_bytes());
                w.link_end();
            }
            Inline::Media {
                resource,
                width,
                height,
                align,
                title,
                kind,
            } => {
                let label = title.as_deref().unwrap_or(resource);
                if has_scheme(resource.as_bytes()) && !is_linkable(resource) {
                    w.write_escaped_text(label.as_bytes());
                    return;
                }
                let tag = match kind {
                    MediaKind::Image => "<img src=\"",
                    MediaKind::Video => "<video controls src=\"",
                    MediaKind::Audio => "<audio controls src=\"",
                    MediaKind::File => "<a href=\"",
                };
                w.write_str(tag);
                w.write_url(resource);
                w.write_str("\" class=\"media");
                w.write_str(align.css_suffix());
                w.write_byte(b'"');
                if *kind != MediaKind::File {
                    if let Some(width) = width {
                        w.attr_u64("width", *width);
                    }
                    if let Some(height) = height {
                        w.attr_u64("height", *height);
                    }
                }
                match kind {
                    MediaKind::Image => {
                        w.attr("alt", label);
                        w.write_str(" />");
                    }
                    MediaKind::Video => w.write_str("></video>"),
                    MediaKind::Audio => w.write_str("></audio>"),
                    MediaKind::File => {
                        w.write_byte(b'>');
                        w.write_escaped_text(label.as_bytes());
                        w.write_str("</a>");
                    }
                }
            }
            Inline::Literal {
                kind,
                text,
                language,
                filename,
            } => match kind {
                LiteralKind::Code => {
                    w.pre_start("code", language.as_deref());
                    w.write_escaped_text(text.as_bytes());
                    w.pre_end();
                }
                LiteralKind::File => {
                    if let Some(name) = filename {
                        w.write_str("<dl class=\"file\"><dt>");
                        w.write_escaped_text(name.as_bytes());
                        w.write_str("</dt><dd>");
                    }
                    w.pre_start("file", language.as_deref());
                    w.write_escaped_text(text.as_bytes());
                    if filename.is_some() {
                        w.write_str("</pre></dd></dl>\n");
                    } else {
                        w.pre_end();
                    }
                }
                LiteralKind::Html | LiteralKind::HtmlBlock => w.write_bytes(text.as_bytes()),
                LiteralKind::NoWiki => w.write_escaped_text(text.as_bytes()),
            },
        }
    }
}

/// Schemes written out as working `href`/`src` values.
const LINK_SCHEMES: [&str; 8] = ["http", "https", "ftp", "ftps", "mailto", "news", "irc", "gopher"];

/// Whether a URL carrying a scheme may be written as a link.
fn is_linkable(url: &str) -> bool {
    url.split_once(':')
        .is_some_and(|(scheme, _)| LINK_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)))
}

/// Unique heading ids: the second `intro` becomes `intro-1`.
#[derive(Default)]
struct HeadingIds {
    /// Next suffix to try per slug.
    next: HashMap<String, usize, FastHashBuilder>,
    used: HashSet<String, FastHashBuilder>,
}

impl HeadingIds {
    fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut n = self.next.get(&base).copied().unwrap_or(0);
        let mut candidate = if n == 0 { base.clone() } else { format!("{base}-{n}") };
        while self.used.contains(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.next.insert(base, n + 1);
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Lowercase; alphanumerics and `_` kept, other runs collapsed to `-`.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}
