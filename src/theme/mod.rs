//! Themes: ordered scope-selector rules and their color palette
//!
//! A theme is loaded once and then only read. Color resolution happens in
//! two places:
//! - the grammar packs a color-map index into each token (see [`ColorMap`])
//! - semantic spans are recolored through a session's [`ThemeRuleMatcher`]
//!
//! [`explain_scopes`] lists every rule touching a scope chain, for display.

mod color_map;
mod explain;
mod matcher;
mod style;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

pub use color_map::ColorMap;
pub use explain::{explain_scopes, ScopeExplanation};
pub use matcher::ThemeRuleMatcher;
pub use style::{FontStyle, RuleStyle};

/// Default foreground when a theme does not name one
pub const DEFAULT_FOREGROUND: &str = "#000000";
/// Default background when a theme does not name one
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// The rule returned when nothing matches: no selector, no colors
pub static EMPTY_RULE: ThemeRule = ThemeRule {
    name: None,
    selector: ScopeSelector::None,
    style: RuleStyle {
        foreground: None,
        background: None,
        font_style: FontStyle::NONE,
    },
};

/// A theme rule's scope pattern
///
/// Each alternative is a space-separated path whose last segment names the
/// scope and whose earlier segments constrain its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSelector {
    /// Theme-global settings with no scope; never matches a token
    None,
    Alternatives(Vec<String>),
}

impl ScopeSelector {
    /// Parse a selector string; commas separate alternatives
    pub fn parse(selector: &str) -> Self {
        Self::from_list(selector.split(','))
    }

    /// Build from an explicit list of alternatives
    pub fn from_list<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = alternatives
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if alternatives.is_empty() {
            ScopeSelector::None
        } else {
            ScopeSelector::Alternatives(alternatives)
        }
    }

    pub fn alternatives(&self) -> &[String] {
        match self {
            ScopeSelector::None => &[],
            ScopeSelector::Alternatives(list) => list,
        }
    }
}

/// One theme rule: selector plus visual style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRule {
    /// Human-readable name from the theme file
    pub name: Option<String>,
    pub selector: ScopeSelector,
    pub style: RuleStyle,
}

impl ThemeRule {
    /// Create a rule from a selector string
    pub fn new(selector: &str, style: RuleStyle) -> Self {
        Self {
            name: None,
            selector: ScopeSelector::parse(selector),
            style,
        }
    }

    /// Foreground color, if the rule sets one
    pub fn foreground(&self) -> Option<&str> {
        self.style.foreground.as_deref()
    }

    /// Display label: the rule name, else its selectors
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.selector.alternatives().join(", "),
        }
    }

    /// Check if this is the no-match sentinel
    pub fn is_empty_rule(&self) -> bool {
        std::ptr::eq(self, &EMPTY_RULE) || (self.selector == ScopeSelector::None && self.style.is_empty())
    }
}

/// `scope` equals `selector` or continues it past a `.` boundary
///
/// `variable` matches `variable` and `variable.other`, never `variables`.
pub(crate) fn scope_matches(selector: &str, scope: &str) -> bool {
    match scope.strip_prefix(selector) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// A loaded color theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    /// Editor foreground, used for tokens no rule colors
    pub foreground: Option<String>,
    /// Editor background
    pub background: Option<String>,
    /// Rules in declared order
    pub rules: Vec<ThemeRule>,
}

impl Theme {
    /// Create a theme from parts
    pub fn new(name: &str, rules: Vec<ThemeRule>) -> Self {
        Self {
            name: name.to_string(),
            foreground: None,
            background: None,
            rules,
        }
    }

    /// Builder: set editor colors
    pub fn with_colors(mut self, foreground: &str, background: &str) -> Self {
        self.foreground = Some(foreground.to_string());
        self.background = Some(background.to_string());
        self
    }

    /// Effective default foreground
    pub fn default_foreground(&self) -> &str {
        self.foreground.as_deref().unwrap_or(DEFAULT_FOREGROUND)
    }

    /// Effective default background
    pub fn default_background(&self) -> &str {
        self.background.as_deref().unwrap_or(DEFAULT_BACKGROUND)
    }

    /// Parse a VS Code style JSON theme
    pub fn from_json_str(source: &str) -> Result<Self> {
        let raw: RawTheme = serde_json::from_str(source)?;
        Ok(raw.into_theme())
    }

    /// Parse the same theme shape written as TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawTheme = toml::from_str(source)?;
        Ok(raw.into_theme())
    }

    /// Load a theme file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let mut theme = if is_toml {
            Self::from_toml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };
        if theme.name.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                theme.name = stem.to_string();
            }
        }
        tracing::debug!(theme = %theme.name, rules = theme.rules.len(), "loaded theme");
        Ok(theme)
    }

    /// Dark theme used when no theme file is configured
    pub fn builtin_dark() -> Self {
        let rules = vec![
            ThemeRule::new("comment", RuleStyle::fg("#6A9955").with_italic()),
            ThemeRule::new("string", RuleStyle::fg("#CE9178")),
            ThemeRule::new("constant.character.escape", RuleStyle::fg("#D7BA7D")),
            ThemeRule::new("constant.numeric", RuleStyle::fg("#B5CEA8")),
            ThemeRule::new("constant.language", RuleStyle::fg("#569CD6")),
            ThemeRule::new("constant.other", RuleStyle::fg("#4FC1FF")),
            ThemeRule::new("keyword", RuleStyle::fg("#569CD6")),
            ThemeRule::new("keyword.control", RuleStyle::fg("#C586C0")),
            ThemeRule::new("keyword.operator", RuleStyle::fg("#D4D4D4")),
            ThemeRule::new("storage", RuleStyle::fg("#569CD6")),
            ThemeRule::new("entity.name.type, support.type", RuleStyle::fg("#4EC9B0")),
            ThemeRule::new("entity.name.function, support.function", RuleStyle::fg("#DCDCAA")),
            ThemeRule::new("entity.name.namespace", RuleStyle::fg("#4EC9B0")),
            ThemeRule::new("entity.name.label", RuleStyle::fg("#C8C8C8")),
            ThemeRule::new("variable", RuleStyle::fg("#9CDCFE")),
            ThemeRule::new("variable.parameter", RuleStyle::fg("#9CDCFE")),
            ThemeRule::new("meta.preprocessor", RuleStyle::fg("#C586C0")),
            ThemeRule::new("meta.attribute", RuleStyle::fg("#9CDCFE")),
            ThemeRule::new("markup.heading", RuleStyle::fg("#569CD6").with_bold()),
            ThemeRule::new("markup.bold", RuleStyle::default().with_bold()),
            ThemeRule::new("markup.italic", RuleStyle::default().with_italic()),
            ThemeRule::new("markup.inline.raw", RuleStyle::fg("#CE9178")),
            ThemeRule::new("markup.underline.link", RuleStyle::fg("#3794FF").with_underline()),
        ];
        Theme::new("builtin-dark", rules).with_colors("#D4D4D4", "#1E1E1E")
    }
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default, rename = "tokenColors", alias = "settings")]
    token_colors: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    scope: Option<RawScope>,
    #[serde(default)]
    settings: RawSettings,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScope {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    foreground: Option<String>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default, rename = "fontStyle")]
    font_style: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Theme {
        let mut foreground = self.colors.get("editor.foreground").cloned();
        let mut background = self.colors.get("editor.background").cloned();

        let mut rules = Vec::with_capacity(self.token_colors.len());
        for raw in self.token_colors {
            let selector = match raw.scope {
                Some(RawScope::One(s)) => ScopeSelector::parse(&s),
                Some(RawScope::Many(list)) => ScopeSelector::from_list(list),
                None => ScopeSelector::None,
            };
            // tmTheme-style global settings live in a scopeless first entry
            if selector == ScopeSelector::None {
                if foreground.is_none() {
                    foreground = raw.settings.foreground.clone();
                }
                if background.is_none() {
                    background = raw.settings.background.clone();
                }
            }
            rules.push(ThemeRule {
                name: raw.name,
                selector,
                style: RuleStyle {
                    foreground: raw.settings.foreground,
                    background: raw.settings.background,
                    font_style: raw
                        .settings
                        .font_style
                        .as_deref()
                        .map(FontStyle::parse)
                        .unwrap_or_default(),
                },
            });
        }

        Theme {
            name: self.name.unwrap_or_default(),
            foreground,
            background,
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_matches_dot_boundary() {
        assert!(scope_matches("variable", "variable"));
        assert!(scope_matches("variable", "variable.other"));
        assert!(!scope_matches("variable", "variables"));
        assert!(!scope_matches("variable.other", "variable"));
    }

    #[test]
    fn test_selector_parse_splits_commas() {
        let selector = ScopeSelector::parse("comment, string.quoted ,");
        assert_eq!(selector.alternatives(), ["comment", "string.quoted"]);
        assert_eq!(ScopeSelector::parse("  "), ScopeSelector::None);
    }

    #[test]
    fn test_from_json_str() {
        let json = r##"{
            "name": "Test",
            "colors": { "editor.foreground": "#cccccc", "editor.background": "#111111" },
            "tokenColors": [
                { "name": "Comments", "scope": "comment", "settings": { "foreground": "#808080", "fontStyle": "italic" } },
                { "scope": ["string", "constant.character"], "settings": { "foreground": "#00ff00" } },
                { "scope": "invalid", "settings": {} }
            ]
        }"##;
        let theme = Theme::from_json_str(json).unwrap();
        assert_eq!(theme.name, "Test");
        assert_eq!(theme.default_foreground(), "#cccccc");
        assert_eq!(theme.default_background(), "#111111");
        assert_eq!(theme.rules.len(), 3);
        assert_eq!(theme.rules[0].name.as_deref(), Some("Comments"));
        assert!(theme.rules[0].style.font_style.is_italic());
        assert_eq!(theme.rules[1].selector.alternatives(), ["string", "constant.character"]);
        assert_eq!(theme.rules[2].foreground(), None);
    }

    #[test]
    fn test_tmtheme_style_global_settings() {
        let json = r##"{
            "settings": [
                { "settings": { "foreground": "#eeeeee", "background": "#222222" } },
                { "scope": "keyword", "settings": { "foreground": "#ff00ff" } }
            ]
        }"##;
        let theme = Theme::from_json_str(json).unwrap();
        assert_eq!(theme.default_foreground(), "#eeeeee");
        assert_eq!(theme.default_background(), "#222222");
        assert_eq!(theme.rules[0].selector, ScopeSelector::None);
    }

    #[test]
    fn test_from_toml_str() {
        let source = r##"
name = "Toml Theme"

[[tokenColors]]
scope = "keyword.control"
settings = { foreground = "#c586c0", fontStyle = "bold" }

[[tokenColors]]
scope = ["comment.line", "comment.block"]
settings = { foreground = "#6a9955" }
"##;
        let theme = Theme::from_toml_str(source).unwrap();
        assert_eq!(theme.name, "Toml Theme");
        assert_eq!(theme.rules.len(), 2);
        assert!(theme.rules[0].style.font_style.is_bold());
        assert_eq!(theme.default_foreground(), DEFAULT_FOREGROUND);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Theme::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_empty_rule_sentinel() {
        assert!(EMPTY_RULE.is_empty_rule());
        assert_eq!(EMPTY_RULE.foreground(), None);
        assert!(!ThemeRule::new("comment", RuleStyle::fg("#fff")).is_empty_rule());
    }

    #[test]
    fn test_rule_label() {
        let mut rule = ThemeRule::new("string, comment", RuleStyle::fg("#fff"));
        assert_eq!(rule.label(), "string, comment");
        rule.name = Some("Strings".to_string());
        assert_eq!(rule.label(), "Strings");
    }
}
