//! Grammar tokenizers
//!
//! The highlighting pipeline only talks to grammars through [`Grammar`]:
//! two line tokenizers sharing one opaque continuation state. The rest of
//! this module is a regex-driven implementation of that interface with a
//! handful of built-in languages.

mod builtin;
mod language;
mod registry;
mod rules;
mod scopes;

pub use language::{LanguageDefinition, ThemedGrammar};
pub use registry::GrammarRegistry;
pub use rules::{LineState, MultilineRule, PatternRule};
pub use scopes::ScopeKind;

/// A grammar token with its scope stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedToken {
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    /// Scopes from outermost to innermost
    pub scopes: Vec<String>,
}

/// Scoped tokens for one line plus the state for the next line
#[derive(Debug, Clone)]
pub struct LineTokens<S> {
    pub tokens: Vec<ScopedToken>,
    pub state: S,
}

/// Packed tokens for one line plus the state for the next line
///
/// `tokens` is a flat `[start_offset, metadata]*` list; see
/// [`crate::metadata`] for the metadata layout. A token ends where the
/// next begins, the last one at the end of the line.
#[derive(Debug, Clone)]
pub struct PackedLineTokens<S> {
    pub tokens: Vec<u32>,
    pub state: S,
}

impl<S> PackedLineTokens<S> {
    /// Number of packed tokens
    pub fn len(&self) -> usize {
        self.tokens.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() < 2
    }
}

/// A line-oriented grammar tokenizer
///
/// `prior` is the state returned for the previous line, `None` on the first
/// line of a document. Both methods must agree on the state they return
/// for the same input.
pub trait Grammar {
    /// Continuation state carried between lines
    type State: Clone;

    /// Root scope of the grammar, e.g. `source.rust`
    fn scope_name(&self) -> &str;

    /// Tokenize a line into tokens carrying their full scope stacks
    fn tokenize_line(&self, line: &str, prior: Option<&Self::State>) -> LineTokens<Self::State>;

    /// Tokenize a line into packed `[offset, metadata]` pairs
    fn tokenize_line_packed(&self, line: &str, prior: Option<&Self::State>) -> PackedLineTokens<Self::State>;
}
