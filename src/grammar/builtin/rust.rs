//! Rust language definition

use crate::grammar::language::LanguageDefinition;
use crate::grammar::rules::{MultilineRule, PatternRule};
use crate::grammar::scopes::ScopeKind;

/// Create Rust language definition
pub fn rust_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("rust", "Rust", "rust");
    lang.add_extension("rs");
    lang.add_alias("rs");

    // Multiline rules (state IDs 1-10)
    // Block comments (nesting is not tracked)
    if let Some(rule) = MultilineRule::new("block_comment", r"/\*", r"\*/", ScopeKind::BlockComment, 1) {
        lang.add_multiline(rule);
    }

    // Raw strings r#"..."# (single hash only)
    if let Some(rule) = MultilineRule::new("raw_string", r##"r#""##, r##""#"##, ScopeKind::RawString, 2) {
        lang.add_multiline(rule);
    }

    // Regular strings (with escape support)
    if let Some(rule) = MultilineRule::with_escape("string", "\"", "\"", ScopeKind::DoubleString, 3, '\\') {
        lang.add_multiline(rule);
    }

    // Single-line patterns (priority 0-100, higher = first)

    // Doc comments
    if let Some(rule) = PatternRule::new("doc_comment", r"//[/!].*$", ScopeKind::DocComment, 101) {
        lang.add_pattern(rule);
    }

    // Line comments
    if let Some(rule) = PatternRule::new("line_comment", r"//.*$", ScopeKind::LineComment, 100) {
        lang.add_pattern(rule);
    }

    // Attributes
    if let Some(rule) = PatternRule::new("attribute", r"#!?\[[^\]]*\]", ScopeKind::Attribute, 95) {
        lang.add_pattern(rule);
    }

    // Character literals
    if let Some(rule) = PatternRule::new("char", r"'(?:[^'\\]|\\.)'", ScopeKind::Char, 90) {
        lang.add_pattern(rule);
    }

    // Lifetimes
    if let Some(rule) = PatternRule::new("lifetime", r"'\w+", ScopeKind::Lifetime, 89) {
        lang.add_pattern(rule);
    }

    // Macros (ending with !)
    if let Some(rule) = PatternRule::new("macro", r"\b\w+!", ScopeKind::Macro, 85) {
        lang.add_pattern(rule);
    }

    // Control flow
    let control = r"\b(break|continue|else|for|if|in|loop|match|return|while|await)\b";
    if let Some(rule) = PatternRule::new("control", control, ScopeKind::ControlKeyword, 81) {
        lang.add_pattern(rule);
    }

    // Keywords
    let keywords = r"\b(as|async|const|crate|dyn|enum|extern|fn|impl|let|mod|move|mut|pub|ref|static|struct|super|trait|type|union|unsafe|use|where)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, ScopeKind::Keyword, 80) {
        lang.add_pattern(rule);
    }

    // self / Self
    if let Some(rule) = PatternRule::new("self", r"\b(self|Self)\b", ScopeKind::SelfVariable, 79) {
        lang.add_pattern(rule);
    }

    // Language constants
    if let Some(rule) = PatternRule::new("constant", r"\b(true|false|None|Some|Ok|Err)\b", ScopeKind::LanguageConstant, 78) {
        lang.add_pattern(rule);
    }

    // Built-in types
    let types = r"\b(bool|char|str|u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64|String|Vec|Box|Rc|Arc|Option|Result)\b";
    if let Some(rule) = PatternRule::new("type", types, ScopeKind::SupportType, 75) {
        lang.add_pattern(rule);
    }

    // Function calls and definitions
    if let Some(rule) = PatternRule::new("function", r"\b[a-z_][a-z0-9_]*\(", ScopeKind::Function, 70) {
        lang.add_pattern(rule);
    }

    // Type names (capitalized identifiers)
    if let Some(rule) = PatternRule::new("type_name", r"\b[A-Z][a-zA-Z0-9_]*\b", ScopeKind::Type, 60) {
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
    // Float
    if let Some(rule) = PatternRule::new("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?\b", ScopeKind::Number, 64) {
        lang.add_pattern(rule);
    }
    // Integer
    if let Some(rule) = PatternRule::new("integer", r"\b\d[\d_]*(?:u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize)?\b", ScopeKind::Number, 63) {
        lang.add_pattern(rule);
    }

    // Operators
    if let Some(rule) = PatternRule::new("operator", r"[+\-*/%&|^!<>=@]+", ScopeKind::Operator, 40) {
        lang.add_pattern(rule);
    }

    lang
}
