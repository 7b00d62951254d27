//! Python language definition

use crate::grammar::language::LanguageDefinition;
use crate::grammar::rules::{MultilineRule, PatternRule};
use crate::grammar::scopes::ScopeKind;

/// Create Python language definition
pub fn python_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("python", "Python", "python");
    lang.add_extension("py");
    lang.add_extension("pyw");
    lang.add_extension("pyi");
    lang.add_alias("py");

    // Multiline rules
    // Triple-quoted strings (docstrings), optional prefix
    if let Some(rule) = MultilineRule::new("triple_double", r#"(?:\b(?i:[rbuf]{1,2}))?""""#, r#"""""#, ScopeKind::TripleString, 1) {
        lang.add_multiline(rule);
    }
    if let Some(rule) = MultilineRule::new("triple_single", r"(?:\b(?i:[rbuf]{1,2}))?'''", r"'''", ScopeKind::TripleString, 2) {
        lang.add_multiline(rule);
    }

    // Regular strings (with escape support)
    if let Some(rule) = MultilineRule::with_escape("double_string", r#"(?:\b(?i:[rbuf]{1,2}))?""#, r#"""#, ScopeKind::DoubleString, 3, '\\') {
        lang.add_multiline(rule);
    }
    if let Some(rule) = MultilineRule::with_escape("single_string", r"(?:\b(?i:[rbuf]{1,2}))?'", r"'", ScopeKind::SingleString, 4, '\\') {
        lang.add_multiline(rule);
    }

    // Single-line patterns

    // Comments
    if let Some(rule) = PatternRule::new("comment", r"#.*$", ScopeKind::LineComment, 100) {
        lang.add_pattern(rule);
    }

    // Decorators
    if let Some(rule) = PatternRule::new("decorator", r"@[\w.]+", ScopeKind::Attribute, 95) {
        lang.add_pattern(rule);
    }

    // Control flow
    let control = r"\b(break|continue|elif|else|except|finally|for|if|raise|return|try|while|with|yield|await|pass)\b";
    if let Some(rule) = PatternRule::new("control", control, ScopeKind::ControlKeyword, 81) {
        lang.add_pattern(rule);
    }

    // Keywords
    let keywords = r"\b(and|as|assert|async|class|def|del|from|global|import|in|is|lambda|nonlocal|not|or)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, ScopeKind::Keyword, 80) {
        lang.add_pattern(rule);
    }

    // Language constants
    if let Some(rule) = PatternRule::new("constant", r"\b(True|False|None)\b", ScopeKind::LanguageConstant, 78) {
        lang.add_pattern(rule);
    }

    // self/cls
    if let Some(rule) = PatternRule::new("self", r"\b(self|cls)\b", ScopeKind::SelfVariable, 77) {
        lang.add_pattern(rule);
    }

    // Built-in functions
    let builtins = r"\b(abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b";
    if let Some(rule) = PatternRule::new("builtin", builtins, ScopeKind::SupportFunction, 75) {
        lang.add_pattern(rule);
    }

    // Function calls and definitions
    if let Some(rule) = PatternRule::new("function", r"\b[A-Za-z_]\w*\(", ScopeKind::Function, 70) {
        lang.add_pattern(rule);
    }

    // Numbers
    // Hex
    if let Some(rule) = PatternRule::new("hex", r"\b0[xX][0-9a-fA-F_]+\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Binary
    if let Some(rule) = PatternRule::new("binary", r"\b0[bB][01_]+\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Octal
    if let Some(rule) = PatternRule::new("octal", r"\b0[oO][0-7_]+\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Float
    if let Some(rule) = PatternRule::new("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b", ScopeKind::Number, 64) {
        lang.add_pattern(rule);
    }
    // Integer
    if let Some(rule) = PatternRule::new("integer", r"\b\d[\d_]*j?\b", ScopeKind::Number, 63) {
        lang.add_pattern(rule);
    }

    // Operators
    if let Some(rule) = PatternRule::new("operator", r"[+\-*/%&|^!<>=@~]+", ScopeKind::Operator, 40) {
        lang.add_pattern(rule);
    }

    lang
}
