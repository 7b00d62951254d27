//! Built-in language definitions

mod c;
mod markdown;
mod python;
mod rust;
mod toml_lang;

use super::language::LanguageDefinition;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![
        rust::rust_language(),
        c::c_language(),
        python::python_language(),
        toml_lang::toml_language(),
        markdown::markdown_language(),
    ]
}
