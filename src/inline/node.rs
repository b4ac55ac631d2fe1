//! Inline node types.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::literal::LiteralKind;

/// Bit-set of text effects applied to a run of text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Effects(u8);

impl Effects {
    /// No effect.
    pub const NONE: Effects = Effects(0);
    /// `**bold**`
    pub const BOLD: Effects = Effects(0b0001);
    /// `//italic//`
    pub const ITALIC: Effects = Effects(0b0010);
    /// `__underline__`
    pub const UNDERLINE: Effects = Effects(0b0100);
    /// ``` ``monospace`` ```
    pub const MONOSPACE: Effects = Effects(0b1000);

    /// Effect toggled by a doubled delimiter byte.
    #[inline]
    pub fn for_delimiter(b: u8) -> Option<Effects> {
        match b {
            b'*' => Some(Self::BOLD),
            b'/' => Some(Self::ITALIC),
            b'_' => Some(Self::UNDERLINE),
            b'`' => Some(Self::MONOSPACE),
            _ => None,
        }
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether no effect is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every effect in `other` is set.
    #[inline]
    pub const fn contains(self, other: Effects) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flip the effects in `other`.
    #[inline]
    pub fn toggle(&mut self, other: Effects) {
        self.0 ^= other.0;
    }
}

impl BitOr for Effects {
    type Output = Effects;

    fn bitor(self, rhs: Effects) -> Effects {
        Effects(self.0 | rhs.0)
    }
}

impl BitOrAssign for Effects {
    fn bitor_assign(&mut self, rhs: Effects) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Effects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Effects, &str); 4] = [
            (Effects::BOLD, "BOLD"),
            (Effects::ITALIC, "ITALIC"),
            (Effects::UNDERLINE, "UNDERLINE"),
            (Effects::MONOSPACE, "MONOSPACE"),
        ];
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (effect, name) in NAMES {
            if self.contains(effect) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Media alignment, chosen by spaces inside `{{ }}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// `{{ res}}`
    Left,
    /// `{{res}}` or `{{ res }}`
    #[default]
    Center,
    /// `{{res }}`
    Right,
}

impl Align {
    /// CSS class suffix (lowercase).
    pub fn css_suffix(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// What a media resource is, judged by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    /// Anything else; rendered as a download link.
    File,
}

impl MediaKind {
    /// Classify a resource name by extension (case-insensitive).
    pub fn from_resource(resource: &str) -> Self {
        let ext = match resource.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Self::File,
        };
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "bmp" | "ico" => Self::Image,
            "mp4" | "webm" | "ogv" => Self::Video,
            "mp3" | "ogg" | "wav" | "flac" | "m4a" => Self::Audio,
            _ => Self::File,
        }
    }
}

/// An inline node inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// A run of text under one set of effects.
    StyledText { effects: Effects, text: String },

    /// `[[target|text]]`, `[[page]]` or a bare URL.
    Link {
        target: String,
        text: String,
        /// Wiki page reference: no display text and no URL scheme given.
        internal: bool,
    },

    /// `{{resource?WxH|title}}`
    Media {
        resource: String,
        width: Option<u64>,
        height: Option<u64>,
        align: Align,
        title: Option<String>,
        kind: MediaKind,
    },

    /// Verbatim region content.
    Literal {
        kind: LiteralKind,
        text: String,
        /// `<code lang>` / `<file lang name>` language, `-` meaning none.
        language: Option<String>,
        /// `<file lang name>` file name.
        filename: Option<String>,
    },
}

impl Inline {
    /// Plain text run with no effects.
    pub fn text(text: impl Into<String>) -> Self {
        Self::StyledText {
            effects: Effects::NONE,
            text: text.into(),
        }
    }

    /// Text run with the given effects.
    pub fn styled(effects: Effects, text: impl Into<String>) -> Self {
        Self::StyledText {
            effects,
            text: text.into(),
        }
    }

    /// External link whose display text is its target.
    pub fn url(url: impl Into<String>) -> Self {
        let target = url.into();
        Self::Link {
            text: target.clone(),
            target,
            internal: false,
        }
    }
}
