//! scopetint - TextMate-style syntax highlighting with theme scopes
//!
//! Source text goes through a line grammar, token colors are resolved
//! against a theme's scope rules, and an optional external analyzer can
//! recolor finer-grained spans on top of the grammar's tokens.
//!
//! ```no_run
//! use scopetint::{Highlighter, Theme};
//!
//! let highlighter = Highlighter::new(Theme::builtin_dark());
//! let html = highlighter.code_to_html("fn main() {}", "rust", None)?;
//! # Ok::<(), scopetint::HighlightError>(())
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod highlighter;
pub mod metadata;
pub mod render;
pub mod semantic;
pub mod theme;
pub mod tokenize;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use grammar::{Grammar, GrammarRegistry, LanguageDefinition};
pub use highlighter::Highlighter;
pub use semantic::{CommandAnalyzer, SemanticAnalyzer, SemanticRecord, SemanticSpan};
pub use theme::{ColorMap, Theme, ThemeRule, ThemeRuleMatcher};
pub use tokenize::{tokenize_with_theme, ThemedToken, ThemedTokenizer, TokenizeOptions};
