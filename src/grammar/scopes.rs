//! Scope kinds for the built-in grammars
//!
//! Each kind maps to a TextMate scope stem. A language appends its own
//! suffix, so `ScopeKind::BlockComment` in C becomes `comment.block.c`.

/// Lexical categories recognized by the built-in grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// `// ...`, `# ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/// ...`
    DocComment,
    /// `"..."`
    DoubleString,
    /// `'...'`
    SingleString,
    /// Triple-quoted and multi-line strings
    TripleString,
    /// `r#"..."#`
    RawString,
    /// Character literals
    Char,
    /// Numeric literals (integers, floats)
    Number,
    /// `true`, `None`, `nullptr`
    LanguageConstant,
    /// Dates and other typed literals
    OtherConstant,
    /// Control flow keywords (if, else, return)
    ControlKeyword,
    /// Other keywords (let, fn, struct)
    Keyword,
    /// Operators (+, -, *, /, etc.)
    Operator,
    /// Primitive and standard type names
    SupportType,
    /// User type names
    Type,
    /// Function names
    Function,
    /// Built-in functions
    SupportFunction,
    /// Macros (println!, vec!)
    Macro,
    /// Preprocessor directives (#include, #define)
    Preprocessor,
    /// Attributes and decorators
    Attribute,
    /// Lifetime annotations ('a)
    Lifetime,
    /// `self`, `cls`, `this`
    SelfVariable,
    /// Table headers and similar section names
    Section,
    /// Keys in key/value formats
    Key,
    /// Markup headings
    Heading,
    /// Markup bold
    Bold,
    /// Markup italic
    Italic,
    /// Inline code spans
    InlineCode,
    /// Fenced code blocks
    FencedCode,
    /// Links and images
    Link,
    /// Block quotes
    Quote,
    /// List bullets and separators
    ListMarker,
    /// Strikethrough text
    Strikethrough,
}

impl ScopeKind {
    /// TextMate scope stem for this kind
    pub fn stem(&self) -> &'static str {
        match self {
            ScopeKind::LineComment => "comment.line",
            ScopeKind::BlockComment => "comment.block",
            ScopeKind::DocComment => "comment.line.documentation",
            ScopeKind::DoubleString => "string.quoted.double",
            ScopeKind::SingleString => "string.quoted.single",
            ScopeKind::TripleString => "string.quoted.triple",
            ScopeKind::RawString => "string.quoted.other.raw",
            ScopeKind::Char => "constant.character",
            ScopeKind::Number => "constant.numeric",
            ScopeKind::LanguageConstant => "constant.language",
            ScopeKind::OtherConstant => "constant.other",
            ScopeKind::ControlKeyword => "keyword.control",
            ScopeKind::Keyword => "keyword.other",
            ScopeKind::Operator => "keyword.operator",
            ScopeKind::SupportType => "support.type",
            ScopeKind::Type => "entity.name.type",
            ScopeKind::Function => "entity.name.function",
            ScopeKind::SupportFunction => "support.function",
            ScopeKind::Macro => "entity.name.function.macro",
            ScopeKind::Preprocessor => "meta.preprocessor",
            ScopeKind::Attribute => "meta.attribute",
            ScopeKind::Lifetime => "storage.modifier.lifetime",
            ScopeKind::SelfVariable => "variable.language",
            ScopeKind::Section => "entity.name.section",
            ScopeKind::Key => "variable.other.key",
            ScopeKind::Heading => "markup.heading",
            ScopeKind::Bold => "markup.bold",
            ScopeKind::Italic => "markup.italic",
            ScopeKind::InlineCode => "markup.inline.raw",
            ScopeKind::FencedCode => "markup.fenced_code.block",
            ScopeKind::Link => "markup.underline.link",
            ScopeKind::Quote => "markup.quote",
            ScopeKind::ListMarker => "punctuation.definition.list",
            ScopeKind::Strikethrough => "markup.strikethrough",
        }
    }

    /// Full scope name with a language suffix
    pub fn scope(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.stem().to_string()
        } else {
            format!("{}.{}", self.stem(), suffix)
        }
    }
}
