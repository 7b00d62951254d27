//! Grammar registry
//!
//! Owns the loaded language definitions and resolves a language id, alias,
//! or file name to one of them.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{HighlightError, Result};

use super::builtin;
use super::language::LanguageDefinition;

/// Loaded languages keyed by id
#[derive(Debug)]
pub struct GrammarRegistry {
    /// Language definitions by id
    languages: HashMap<String, LanguageDefinition>,
    /// Alias to language id mapping
    alias_map: HashMap<String, String>,
    /// Extension to language id mapping
    extension_map: HashMap<String, String>,
    next_language_id: u32,
}

impl GrammarRegistry {
    /// Create a registry with the built-in languages
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for lang in builtin::all_languages() {
            registry.add_language(lang);
        }
        registry
    }

    /// Create a registry with no languages
    pub fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            alias_map: HashMap::new(),
            extension_map: HashMap::new(),
            next_language_id: 1,
        }
    }

    /// Add a language definition, assigning it the next numeric id
    ///
    /// A language with an id already present replaces the old one.
    pub fn add_language(&mut self, mut lang: LanguageDefinition) {
        let id = lang.id.to_lowercase();
        lang.language_id = match self.languages.get(&id) {
            Some(existing) => existing.language_id,
            None => {
                let assigned = self.next_language_id;
                self.next_language_id += 1;
                assigned
            }
        };
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), id.clone());
        }
        for alias in &lang.aliases {
            self.alias_map.insert(alias.to_lowercase(), id.clone());
        }
        tracing::trace!(language = %id, language_id = lang.language_id, "registered language");
        self.languages.insert(id, lang);
    }

    /// Resolve an id or alias to the canonical language id
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let key = name.to_lowercase();
        if let Some((id, _)) = self.languages.get_key_value(&key) {
            return Some(id.as_str());
        }
        self.alias_map.get(&key).map(String::as_str)
    }

    /// Get a language definition by id or alias
    pub fn language(&self, name: &str) -> Result<&LanguageDefinition> {
        self.resolve(name)
            .and_then(|id| self.languages.get(id))
            .ok_or_else(|| HighlightError::UnknownLanguage(name.to_string()))
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(String::as_str)
    }

    /// List available language ids
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}
