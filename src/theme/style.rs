//! Style types for themed tokens
//!
//! Font style bits follow the packed TextMate token layout so they can be
//! copied in and out of token metadata unchanged.

use serde::{Serialize, Serializer};

/// Font style bit set (italic = 1, bold = 2, underline = 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle(u8);

impl FontStyle {
    pub const NONE: FontStyle = FontStyle(0);
    pub const ITALIC: FontStyle = FontStyle(1);
    pub const BOLD: FontStyle = FontStyle(2);
    pub const UNDERLINE: FontStyle = FontStyle(4);

    /// Build from raw bits, ignoring anything above the three style bits
    pub const fn from_bits(bits: u8) -> Self {
        FontStyle(bits & 0b111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Parse a theme `fontStyle` string such as `"bold italic"`
    ///
    /// Unknown words are ignored, matching how editors treat them.
    pub fn parse(value: &str) -> Self {
        value
            .split_whitespace()
            .fold(FontStyle::NONE, |acc, word| match word {
                "italic" => acc | FontStyle::ITALIC,
                "bold" => acc | FontStyle::BOLD,
                "underline" => acc | FontStyle::UNDERLINE,
                _ => acc,
            })
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn is_italic(&self) -> bool {
        self.0 & Self::ITALIC.0 != 0
    }

    pub fn is_bold(&self) -> bool {
        self.0 & Self::BOLD.0 != 0
    }

    pub fn is_underline(&self) -> bool {
        self.0 & Self::UNDERLINE.0 != 0
    }

    /// Theme spelling of the set bits, e.g. `"bold italic"`
    pub fn names(&self) -> String {
        [(self.is_bold(), "bold"), (self.is_italic(), "italic"), (self.is_underline(), "underline")]
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Serialize for FontStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.names())
    }
}

impl std::ops::BitOr for FontStyle {
    type Output = FontStyle;

    fn bitor(self, rhs: FontStyle) -> FontStyle {
        FontStyle(self.0 | rhs.0)
    }
}

/// Visual style attached to a theme rule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleStyle {
    /// Foreground color (`#rrggbb` or `#rrggbbaa`)
    pub foreground: Option<String>,
    /// Background color
    pub background: Option<String>,
    /// Bold/italic/underline bits
    pub font_style: FontStyle,
}

impl RuleStyle {
    /// Create a style with just a foreground color
    pub fn fg(color: &str) -> Self {
        Self {
            foreground: Some(color.to_string()),
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: &str) -> Self {
        self.background = Some(color.to_string());
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.font_style = self.font_style | FontStyle::BOLD;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.font_style = self.font_style | FontStyle::ITALIC;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.font_style = self.font_style | FontStyle::UNDERLINE;
        self
    }

    /// Check if this style carries nothing
    pub fn is_empty(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.font_style.is_none()
    }
}
