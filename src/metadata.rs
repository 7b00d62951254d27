//! Packed per-token metadata
//!
//! A grammar's fast tokenization path emits one `u32` per token:
//!
//! ```text
//! bbbb bbbb bfff ffff ffFF FTTT LLLL LLLL
//! ```
//!
//! - `L` language id (bits 0-7)
//! - `T` standard token type (bits 8-10)
//! - `F` font style (bits 11-13)
//! - `f` foreground color index (bits 14-22)
//! - `b` background color index (bits 23-31)

use crate::theme::FontStyle;

const LANGUAGE_ID_MASK: u32 = 0b0000_0000_0000_0000_0000_0000_1111_1111;
const TOKEN_TYPE_MASK: u32 = 0b0000_0000_0000_0000_0000_0111_0000_0000;
const FONT_STYLE_MASK: u32 = 0b0000_0000_0000_0000_0011_1000_0000_0000;
const FOREGROUND_MASK: u32 = 0b0000_0000_0111_1111_1100_0000_0000_0000;
const BACKGROUND_MASK: u32 = 0b1111_1111_1000_0000_0000_0000_0000_0000;

const LANGUAGE_ID_OFFSET: u32 = 0;
const TOKEN_TYPE_OFFSET: u32 = 8;
const FONT_STYLE_OFFSET: u32 = 11;
const FOREGROUND_OFFSET: u32 = 14;
const BACKGROUND_OFFSET: u32 = 23;

/// Largest color index a 9-bit field can hold
pub const MAX_COLOR_INDEX: u32 = 0x1FF;

/// Standard token types carried in bits 8-10
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardTokenType {
    Other = 0,
    Comment = 1,
    String = 2,
    RegEx = 4,
}

impl StandardTokenType {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => StandardTokenType::Comment,
            2 => StandardTokenType::String,
            4 => StandardTokenType::RegEx,
            _ => StandardTokenType::Other,
        }
    }

    /// Classify a scope the way TextMate tokenizers do
    pub fn for_scope(scope: &str) -> Self {
        let first = scope.split('.').next().unwrap_or_default();
        match first {
            "comment" => StandardTokenType::Comment,
            "string" => StandardTokenType::String,
            "regex" => StandardTokenType::RegEx,
            _ => StandardTokenType::Other,
        }
    }
}

/// Extract the foreground color index
pub fn foreground_color_index(metadata: u32) -> usize {
    ((metadata & FOREGROUND_MASK) >> FOREGROUND_OFFSET) as usize
}

/// Extract the background color index
pub fn background_color_index(metadata: u32) -> usize {
    ((metadata & BACKGROUND_MASK) >> BACKGROUND_OFFSET) as usize
}

/// Extract the font style bits
pub fn font_style(metadata: u32) -> FontStyle {
    FontStyle::from_bits(((metadata & FONT_STYLE_MASK) >> FONT_STYLE_OFFSET) as u8)
}

/// Extract the embedded language id
pub fn language_id(metadata: u32) -> u32 {
    (metadata & LANGUAGE_ID_MASK) >> LANGUAGE_ID_OFFSET
}

/// Extract the standard token type
pub fn token_type(metadata: u32) -> StandardTokenType {
    StandardTokenType::from_bits((metadata & TOKEN_TYPE_MASK) >> TOKEN_TYPE_OFFSET)
}

/// Pack fields into one metadata word; oversized fields are truncated to their width
pub fn pack(
    language_id: u32,
    token_type: StandardTokenType,
    font_style: FontStyle,
    foreground: u32,
    background: u32,
) -> u32 {
    ((language_id << LANGUAGE_ID_OFFSET) & LANGUAGE_ID_MASK)
        | (((token_type as u32) << TOKEN_TYPE_OFFSET) & TOKEN_TYPE_MASK)
        | ((u32::from(font_style.bits()) << FONT_STYLE_OFFSET) & FONT_STYLE_MASK)
        | ((foreground << FOREGROUND_OFFSET) & FOREGROUND_MASK)
        | ((background << BACKGROUND_OFFSET) & BACKGROUND_MASK)
}
