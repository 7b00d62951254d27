//! Output renderers for themed token lines

pub mod ansi;
pub mod html;

pub use ansi::{parse_hex_color, render_to_ansi};
pub use html::{render_to_html, HtmlOptions};
