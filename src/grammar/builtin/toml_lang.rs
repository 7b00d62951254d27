//! TOML language definition

use crate::grammar::language::LanguageDefinition;
use crate::grammar::rules::{MultilineRule, PatternRule};
use crate::grammar::scopes::ScopeKind;

/// Create TOML language definition
pub fn toml_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("toml", "TOML", "toml");
    lang.add_extension("toml");

    // Multiline rules
    // Multi-line basic strings
    if let Some(rule) = MultilineRule::new("multiline_basic", r#"""""#, r#"""""#, ScopeKind::TripleString, 1) {
        lang.add_multiline(rule);
    }
    // Multi-line literal strings
    if let Some(rule) = MultilineRule::new("multiline_literal", r"'''", r"'''", ScopeKind::TripleString, 2) {
        lang.add_multiline(rule);
    }

    // Basic strings (with escape support)
    if let Some(rule) = MultilineRule::with_escape("basic_string", r#"""#, r#"""#, ScopeKind::DoubleString, 3, '\\') {
        lang.add_multiline(rule);
    }
    // Literal strings (no escapes)
    if let Some(rule) = MultilineRule::new("literal_string", r"'", r"'", ScopeKind::SingleString, 4) {
        lang.add_multiline(rule);
    }

    // Single-line patterns

    // Comments
    if let Some(rule) = PatternRule::new("comment", r"#.*$", ScopeKind::LineComment, 100) {
        lang.add_pattern(rule);
    }

    // Table headers
    if let Some(rule) = PatternRule::new("table", r"^\s*\[\[?[^\]]+\]\]?", ScopeKind::Section, 95) {
        lang.add_pattern(rule);
    }

    // Bare keys at line start; the `=` is matched separately
    if let Some(rule) = PatternRule::new("key", r"^\s*[\w\-\.]+", ScopeKind::Key, 90) {
        lang.add_pattern(rule);
    }

    // Booleans
    if let Some(rule) = PatternRule::new("boolean", r"\b(true|false)\b", ScopeKind::LanguageConstant, 80) {
        lang.add_pattern(rule);
    }

    // Dates/times
    if let Some(rule) = PatternRule::new("datetime", r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?", ScopeKind::OtherConstant, 75) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("time", r"\d{2}:\d{2}:\d{2}(?:\.\d+)?", ScopeKind::OtherConstant, 74) {
        lang.add_pattern(rule);
    }

    // Numbers
    // Hex
    if let Some(rule) = PatternRule::new("hex", r"\b0x[0-9a-fA-F_]+\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Binary
    if let Some(rule) = PatternRule::new("binary", r"\b0b[01_]+\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Octal
    if let Some(rule) = PatternRule::new("octal", r"\b0o[0-7_]+\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Float (including special values)
    if let Some(rule) = PatternRule::new("float", r"[+-]?(?:\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?|\binf\b|\bnan\b)", ScopeKind::Number, 64) {
        lang.add_pattern(rule);
    }
    // Integer
    if let Some(rule) = PatternRule::new("integer", r"[+-]?\b\d[\d_]*\b", ScopeKind::Number, 63) {
        lang.add_pattern(rule);
    }

    // Punctuation
    if let Some(rule) = PatternRule::new("assign", r"=", ScopeKind::Operator, 40) {
        lang.add_pattern(rule);
    }

    lang
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::theme::{ColorMap, Theme};

    #[test]
    fn test_all_rules_compile() {
        let lang = toml_language();
        assert_eq!(lang.multiline_rules.len(), 4);
        assert_eq!(lang.patterns.len(), 12);
    }

    #[test]
    fn test_key_value_line() {
        let lang = toml_language();
        let theme = Theme::builtin_dark();
        let grammar = lang.bind(&theme, &ColorMap::from_theme(&theme));
        let line = "name = \"scopetint\"";
        let result = grammar.tokenize_line(line, None);
        let texts: Vec<&str> = result.tokens.iter().map(|t| &line[t.start..t.end]).collect();
        assert_eq!(texts, ["name", " ", "=", " ", "\"scopetint\""]);
        assert_eq!(result.tokens[0].scopes[1], "variable.other.key.toml");
    }

    #[test]
    fn test_table_header() {
        let lang = toml_language();
        let theme = Theme::builtin_dark();
        let grammar = lang.bind(&theme, &ColorMap::from_theme(&theme));
        let result = grammar.tokenize_line("[dependencies]", None);
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].scopes[1], "entity.name.section.toml");
    }
}
