//! HTML rendering

use crate::tokenize::ThemedToken;

/// Background used when none is given
pub const DEFAULT_BACKGROUND: &str = "#fff";

/// Options for [`render_to_html`]
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Language label shown above the code
    pub language_id: Option<String>,
    /// `<pre>` background color
    pub background: Option<String>,
}

fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

fn span_style(token: &ThemedToken) -> String {
    let mut style = Vec::new();
    if let Some(color) = &token.color {
        style.push(format!("color: {color}"));
    }
    if token.font_style.is_italic() {
        style.push("font-style: italic".to_string());
    }
    if token.font_style.is_bold() {
        style.push("font-weight: bold".to_string());
    }
    if token.font_style.is_underline() {
        style.push("text-decoration: underline".to_string());
    }
    style.join("; ")
}

/// Render token lines as a `<pre><code>` block
///
/// One `<span>` per token, one `\n` per line; trailing newlines are dropped.
pub fn render_to_html(lines: &[Vec<ThemedToken>], options: &HtmlOptions) -> String {
    let background = options.background.as_deref().unwrap_or(DEFAULT_BACKGROUND);
    let mut html = format!(r#"<pre class="scopetint" style="background-color: {}">"#, html_escape(background));
    if let Some(language_id) = &options.language_id {
        html.push_str(&format!(r#"<div class="language-id">{}</div>"#, html_escape(language_id)));
    }
    html.push_str("<code>");

    for line in lines {
        for token in line {
            let style = span_style(token);
            if style.is_empty() {
                html.push_str(&format!("<span>{}</span>", html_escape(&token.content)));
            } else {
                html.push_str(&format!(r#"<span style="{}">{}</span>"#, style, html_escape(&token.content)));
            }
        }
        html.push('\n');
    }

    let trimmed = html.trim_end_matches('\n').len();
    html.truncate(trimmed);
    html.push_str("</code></pre>");
    html
}
