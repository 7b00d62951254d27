//! C/C++ language definition

use crate::grammar::language::LanguageDefinition;
use crate::grammar::rules::{MultilineRule, PatternRule};
use crate::grammar::scopes::ScopeKind;

/// Create C language definition (also works for C++)
pub fn c_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("c", "C", "c");
    lang.add_extension("c");
    lang.add_extension("h");
    lang.add_extension("cpp");
    lang.add_extension("hpp");
    lang.add_extension("cc");
    lang.add_extension("cxx");
    lang.add_alias("cpp");
    lang.add_alias("c++");
    lang.add_alias("objc");

    // Multiline rules
    // Block comments
    if let Some(rule) = MultilineRule::new("block_comment", r"/\*", r"\*/", ScopeKind::BlockComment, 1) {
        lang.add_multiline(rule);
    }

    // Strings (with escape support)
    if let Some(rule) = MultilineRule::with_escape("string", r#"""#, r#"""#, ScopeKind::DoubleString, 2, '\\') {
        lang.add_multiline(rule);
    }

    // Single-line patterns

    // Line comments
    if let Some(rule) = PatternRule::new("line_comment", r"//.*$", ScopeKind::LineComment, 100) {
        lang.add_pattern(rule);
    }

    // Preprocessor directives
    if let Some(rule) = PatternRule::new("preprocessor", r"^\s*#\s*\w+", ScopeKind::Preprocessor, 95) {
        lang.add_pattern(rule);
    }

    // Character literals
    if let Some(rule) = PatternRule::new("char", r"'(?:[^'\\]|\\.)'", ScopeKind::Char, 90) {
        lang.add_pattern(rule);
    }

    // Control flow
    let control = r"\b(break|case|continue|default|do|else|for|goto|if|return|switch|while|try|catch|throw|co_await|co_return|co_yield)\b";
    if let Some(rule) = PatternRule::new("control", control, ScopeKind::ControlKeyword, 81) {
        lang.add_pattern(rule);
    }

    // Keywords
    let keywords = r"\b(auto|char|const|double|enum|extern|float|inline|int|long|register|restrict|short|signed|sizeof|static|struct|typedef|union|unsigned|void|volatile|_Alignas|_Alignof|_Atomic|_Bool|_Complex|_Generic|_Imaginary|_Noreturn|_Static_assert|_Thread_local)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, ScopeKind::Keyword, 80) {
        lang.add_pattern(rule);
    }

    // C++ keywords
    let cpp_keywords = r"\b(alignas|alignof|and|and_eq|asm|bitand|bitor|bool|class|compl|concept|consteval|constexpr|constinit|const_cast|decltype|delete|dynamic_cast|explicit|export|friend|mutable|namespace|new|noexcept|not|not_eq|operator|or|or_eq|private|protected|public|reinterpret_cast|requires|static_assert|static_cast|template|thread_local|typeid|typename|using|virtual|xor|xor_eq)\b";
    if let Some(rule) = PatternRule::new("cpp_keyword", cpp_keywords, ScopeKind::Keyword, 79) {
        lang.add_pattern(rule);
    }

    // Language constants
    if let Some(rule) = PatternRule::new("constant", r"\b(true|false|nullptr|NULL)\b", ScopeKind::LanguageConstant, 78) {
        lang.add_pattern(rule);
    }

    // this
    if let Some(rule) = PatternRule::new("this", r"\bthis\b", ScopeKind::SelfVariable, 77) {
        lang.add_pattern(rule);
    }

    // Type names (standard types)
    let types = r"\b(size_t|ptrdiff_t|intptr_t|uintptr_t|int8_t|int16_t|int32_t|int64_t|uint8_t|uint16_t|uint32_t|uint64_t|FILE)\b";
    if let Some(rule) = PatternRule::new("type", types, ScopeKind::SupportType, 75) {
        lang.add_pattern(rule);
    }

    // Function calls and definitions
    if let Some(rule) = PatternRule::new("function", r"\b[A-Za-z_][A-Za-z0-9_]*\(", ScopeKind::Function, 70) {
        lang.add_pattern(rule);
    }

    // Numbers
    // Hex
    if let Some(rule) = PatternRule::new("hex", r"\b0[xX][0-9a-fA-F]+[uUlL]*\b", ScopeKind::Number, 65) {
        lang.add_pattern(rule);
    }
    // Float
    if let Some(rule) = PatternRule::new("float", r"\b\d+\.\d*(?:[eE][+-]?\d+)?[fFlL]?\b", ScopeKind::Number, 64) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("float2", r"\b\d*\.\d+(?:[eE][+-]?\d+)?[fFlL]?\b", ScopeKind::Number, 64) {
        lang.add_pattern(rule);
    }
    // Integer
    if let Some(rule) = PatternRule::new("integer", r"\b\d+[uUlL]*\b", ScopeKind::Number, 63) {
        lang.add_pattern(rule);
    }

    // Operators
    if let Some(rule) = PatternRule::new("operator", r"[+\-*/%&|^!<>=~?:]+", ScopeKind::Operator, 40) {
        lang.add_pattern(rule);
    }

    lang
}
