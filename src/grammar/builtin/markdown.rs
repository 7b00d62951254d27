//! Markdown language definition

use crate::grammar::language::LanguageDefinition;
use crate::grammar::rules::{MultilineRule, PatternRule};
use crate::grammar::scopes::ScopeKind;

/// Create Markdown language definition
pub fn markdown_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("markdown", "Markdown", "markdown").with_scope_name("text.html.markdown");
    lang.add_extension("md");
    lang.add_extension("markdown");
    lang.add_extension("mkd");
    lang.add_alias("md");

    // Fenced code blocks
    if let Some(rule) = MultilineRule::new("code_block", r"^```", r"^```", ScopeKind::FencedCode, 1) {
        lang.add_multiline(rule);
    }

    // Headings
    if let Some(rule) = PatternRule::new("heading", r"^#{1,6}\s+.*$", ScopeKind::Heading, 100) {
        lang.add_pattern(rule);
    }

    // Bold (** or __)
    if let Some(rule) = PatternRule::new("bold", r"\*\*[^*]+\*\*", ScopeKind::Bold, 90) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("bold2", r"__[^_]+__", ScopeKind::Bold, 90) {
        lang.add_pattern(rule);
    }

    // Inline code
    if let Some(rule) = PatternRule::new("inline_code", r"`[^`]+`", ScopeKind::InlineCode, 88) {
        lang.add_pattern(rule);
    }

    // Italic (* or _)
    if let Some(rule) = PatternRule::new("italic", r"\*[^*\s][^*]*\*", ScopeKind::Italic, 85) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("italic2", r"\b_[^_]+_\b", ScopeKind::Italic, 85) {
        lang.add_pattern(rule);
    }

    // Images ![alt](url)
    if let Some(rule) = PatternRule::new("image", r"!\[[^\]]*\]\([^)]+\)", ScopeKind::Link, 81) {
        lang.add_pattern(rule);
    }

    // Links [text](url)
    if let Some(rule) = PatternRule::new("link", r"\[[^\]]+\]\([^)]+\)", ScopeKind::Link, 80) {
        lang.add_pattern(rule);
    }

    // Reference links [text][ref]
    if let Some(rule) = PatternRule::new("ref_link", r"\[[^\]]+\]\[[^\]]*\]", ScopeKind::Link, 79) {
        lang.add_pattern(rule);
    }

    // Blockquotes
    if let Some(rule) = PatternRule::new("blockquote", r"^>\s+.*$", ScopeKind::Quote, 75) {
        lang.add_pattern(rule);
    }

    // Horizontal rules
    if let Some(rule) = PatternRule::new("hr", r"^(?:---+|\*\*\*+|___+)\s*$", ScopeKind::ListMarker, 70) {
        lang.add_pattern(rule);
    }

    // List items
    if let Some(rule) = PatternRule::new("list", r"^\s*[-*+]\s", ScopeKind::ListMarker, 65) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("numbered_list", r"^\s*\d+\.\s", ScopeKind::ListMarker, 65) {
        lang.add_pattern(rule);
    }

    // Strikethrough
    if let Some(rule) = PatternRule::new("strikethrough", r"~~[^~]+~~", ScopeKind::Strikethrough, 60) {
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
        let lang = markdown_language();
        assert_eq!(lang.scope_name, "text.html.markdown");
        assert_eq!(lang.multiline_rules.len(), 1);
        assert_eq!(lang.patterns.len(), 14);
    }

    #[test]
    fn test_heading_covers_line() {
        let lang = markdown_language();
        let theme = Theme::builtin_dark();
        let grammar = lang.bind(&theme, &ColorMap::from_theme(&theme));
        let result = grammar.tokenize_line("## Install", None);
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].scopes, ["text.html.markdown", "markup.heading.markdown"]);
    }

    #[test]
    fn test_list_bullet_then_bold() {
        let lang = markdown_language();
        let theme = Theme::builtin_dark();
        let grammar = lang.bind(&theme, &ColorMap::from_theme(&theme));
        let line = "- a **b**";
        let result = grammar.tokenize_line(line, None);
        let texts: Vec<&str> = result.tokens.iter().map(|t| &line[t.start..t.end]).collect();
        assert_eq!(texts, ["- ", "a ", "**b**"]);
        assert_eq!(result.tokens[2].scopes[1], "markup.bold.markdown");
    }

    #[test]
    fn test_fenced_block_spans_lines() {
        let lang = markdown_language();
        let theme = Theme::builtin_dark();
        let grammar = lang.bind(&theme, &ColorMap::from_theme(&theme));
        let open = grammar.tokenize_line("```rust", None);
        assert!(open.state.is_inside_multiline());
        let body = grammar.tokenize_line("let x = 1;", Some(&open.state));
        assert_eq!(body.tokens[0].scopes[1], "markup.fenced_code.block.markdown");
        let close = grammar.tokenize_line("```", Some(&body.state));
        assert!(close.state.is_normal());
    }
}
