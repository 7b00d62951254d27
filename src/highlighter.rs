//! High-level highlighting entry point
//!
//! Bundles a grammar registry with one theme and its color map so callers
//! can go straight from source text to tokens, HTML or terminal output.

use std::io::Write;

use crate::error::Result;
use crate::grammar::GrammarRegistry;
use crate::render::{self, HtmlOptions};
use crate::semantic::SemanticAnalyzer;
use crate::theme::{ColorMap, Theme};
use crate::tokenize::{ThemedToken, ThemedTokenizer, TokenizeOptions};

/// A theme plus every registered grammar
#[derive(Debug)]
pub struct Highlighter {
    registry: GrammarRegistry,
    theme: Theme,
    color_map: ColorMap,
    options: TokenizeOptions,
    /// HTML background; the theme's when unset
    background: Option<String>,
}

impl Highlighter {
    /// Create a highlighter with the built-in grammars
    pub fn new(theme: Theme) -> Self {
        Self::with_registry(theme, GrammarRegistry::new())
    }

    pub fn with_registry(theme: Theme, registry: GrammarRegistry) -> Self {
        let color_map = ColorMap::from_theme(&theme);
        Self {
            registry,
            theme,
            color_map,
            options: TokenizeOptions::default(),
            background: None,
        }
    }

    /// Builder: tokenizer options used for every call
    pub fn with_options(mut self, options: TokenizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: override the HTML background
    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.background = background;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GrammarRegistry {
        &mut self.registry
    }

    /// Tokenize `code` written in `lang` (an id or alias)
    ///
    /// `lang` is also the extension of the file handed to `analyzer`.
    pub fn code_to_tokens(
        &self,
        code: &str,
        lang: &str,
        analyzer: Option<&dyn SemanticAnalyzer>,
    ) -> Result<Vec<Vec<ThemedToken>>> {
        let language = self.registry.language(lang)?;
        let grammar = language.bind(&self.theme, &self.color_map);
        let mut tokenizer = ThemedTokenizer::with_options(&self.theme, &self.color_map, self.options.clone());
        let lines = tokenizer.tokenize(code, &grammar, lang, analyzer)?;
        let stats = tokenizer.splice_stats();
        if stats.skipped > 0 {
            tracing::debug!(applied = stats.applied, skipped = stats.skipped, "semantic splice finished with skips");
        }
        Ok(lines)
    }

    /// Highlight `code` as an HTML `<pre>` block on the theme background
    pub fn code_to_html(&self, code: &str, lang: &str, analyzer: Option<&dyn SemanticAnalyzer>) -> Result<String> {
        let lines = self.code_to_tokens(code, lang, analyzer)?;
        let options = HtmlOptions {
            language_id: Some(lang.to_string()),
            background: Some(
                self.background
                    .clone()
                    .unwrap_or_else(|| self.theme.default_background().to_string()),
            ),
        };
        Ok(render::render_to_html(&lines, &options))
    }

    /// Highlight `code` as ANSI-colored text
    pub fn code_to_ansi<W: Write>(
        &self,
        code: &str,
        lang: &str,
        analyzer: Option<&dyn SemanticAnalyzer>,
        out: &mut W,
    ) -> Result<()> {
        let lines = self.code_to_tokens(code, lang, analyzer)?;
        render::render_to_ansi(&lines, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HighlightError;
    use crate::grammar::{LanguageDefinition, PatternRule, ScopeKind};
    use crate::theme::{RuleStyle, ThemeRule};

    #[test]
    fn test_code_to_tokens_colors_keywords() {
        let highlighter = Highlighter::new(Theme::builtin_dark());
        let lines = highlighter.code_to_tokens("fn main() {}", "rust", None).unwrap();
        assert_eq!(lines[0][0].content, "fn");
        assert_eq!(lines[0][0].color.as_deref(), Some("#569CD6"));
    }

    #[test]
    fn test_alias_resolves() {
        let highlighter = Highlighter::new(Theme::builtin_dark());
        assert!(highlighter.code_to_tokens("x = 1", "py", None).is_ok());
    }

    #[test]
    fn test_unknown_language() {
        let highlighter = Highlighter::new(Theme::builtin_dark());
        let result = highlighter.code_to_tokens("x", "cobol", None);
        assert!(matches!(result, Err(HighlightError::UnknownLanguage(_))));
    }

    #[test]
    fn test_code_to_html_uses_theme_background() {
        let highlighter = Highlighter::new(Theme::builtin_dark());
        let html = highlighter.code_to_html("// hi\n", "c", None).unwrap();
        assert!(html.starts_with(r#"<pre class="scopetint" style="background-color: #1E1E1E"><div class="language-id">c</div>"#));
        assert!(html.ends_with("</span></code></pre>"));
    }

    #[test]
    fn test_registered_language_is_used() {
        let mut highlighter = Highlighter::new(Theme::builtin_dark());
        let mut lang = LanguageDefinition::new("ini", "INI", "ini");
        if let Some(rule) = PatternRule::new("comment", r";.*$", ScopeKind::LineComment, 100) {
            lang.add_pattern(rule);
        }
        highlighter.registry_mut().add_language(lang);
        let lines = highlighter.code_to_tokens("a ; note", "ini", None).unwrap();
        assert_eq!(lines[0][1].content, "; note");
        let comment = highlighter.color_map().id_of("#6A9955").unwrap();
        assert_eq!(highlighter.color_map().get(comment as usize), lines[0][1].color.as_deref());
    }

    #[test]
    fn test_background_override() {
        let highlighter = Highlighter::new(Theme::builtin_dark()).with_background(Some("#000".to_string()));
        let html = highlighter.code_to_html("x", "c", None).unwrap();
        assert!(html.starts_with(r#"<pre class="scopetint" style="background-color: #000">"#));
    }

    #[test]
    fn test_code_to_ansi_writes_every_line() {
        let highlighter = Highlighter::new(Theme::builtin_dark());
        let mut out = Vec::new();
        highlighter.code_to_ansi("a = 1\nb = 2", "toml", None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 2);
    }

    #[test]
    fn test_code_to_ansi_accepts_short_alpha_colors() {
        let theme = Theme::new("alpha", vec![ThemeRule::new("keyword", RuleStyle::fg("#f00a"))]);
        let highlighter = Highlighter::new(theme);
        let mut out = Vec::new();
        highlighter.code_to_ansi("if x:\n    pass", "python", None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[38;2;255;0;0mif"));
        assert_eq!(text.matches('\n').count(), 2);
    }
}
