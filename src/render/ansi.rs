//! ANSI terminal rendering using crossterm

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::error::{HighlightError, Result};
use crate::tokenize::ThemedToken;

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (alpha ignored)
pub fn parse_hex_color(value: &str) -> Result<Color> {
    let invalid = || HighlightError::InvalidColor(value.to_string());
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 | 4 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(Color::Rgb { r: expand(0)?, g: expand(1)?, b: expand(2)? })
        }
        6 | 8 => Ok(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        _ => Err(invalid()),
    }
}

/// Write token lines with 24-bit color escapes, one line per row
///
/// A token whose color does not parse is printed in the default color.
pub fn render_to_ansi<W: Write>(lines: &[Vec<ThemedToken>], out: &mut W) -> Result<()> {
    for line in lines {
        for token in line {
            let color = token.color.as_deref().and_then(|value| match parse_hex_color(value) {
                Ok(color) => Some(color),
                Err(e) => {
                    tracing::warn!(error = %e, "printing token without color");
                    None
                }
            });
            let styled = color.is_some() || !token.font_style.is_none();
            if let Some(color) = color {
                queue!(out, SetForegroundColor(color))?;
            }
            if token.font_style.is_bold() {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if token.font_style.is_italic() {
                queue!(out, SetAttribute(Attribute::Italic))?;
            }
            if token.font_style.is_underline() {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            queue!(out, Print(&token.content))?;
            if styled {
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}
