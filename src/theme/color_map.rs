//! Flat color palette indexed by packed token metadata

use std::collections::HashMap;

use super::Theme;

/// Color palette shared between a theme-bound grammar and the tokenizer
///
/// Index 0 is reserved, 1 is the default foreground, 2 the default
/// background; rule colors follow in declared order. Colors are compared
/// case-insensitively and stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    colors: Vec<String>,
    ids: HashMap<String, u32>,
}

impl ColorMap {
    pub const DEFAULT_FOREGROUND_ID: u32 = 1;
    pub const DEFAULT_BACKGROUND_ID: u32 = 2;

    /// Create a palette holding only the reserved slot
    pub fn new() -> Self {
        Self {
            colors: vec![String::new()],
            ids: HashMap::new(),
        }
    }

    /// Build the palette for a theme
    pub fn from_theme(theme: &Theme) -> Self {
        let mut map = Self::new();
        map.intern(theme.default_foreground());
        map.intern(theme.default_background());
        for rule in &theme.rules {
            if let Some(fg) = &rule.style.foreground {
                map.intern(fg);
            }
            if let Some(bg) = &rule.style.background {
                map.intern(bg);
            }
        }
        map
    }

    /// Return the id for a color, adding it if new
    pub fn intern(&mut self, color: &str) -> u32 {
        let key = color.to_ascii_uppercase();
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        let id = self.colors.len() as u32;
        self.colors.push(key.clone());
        self.ids.insert(key, id);
        id
    }

    /// Look up the id of a known color
    pub fn id_of(&self, color: &str) -> Option<u32> {
        self.ids.get(&color.to_ascii_uppercase()).copied()
    }

    /// Color at an index; the reserved slot and out-of-range ids give `None`
    pub fn get(&self, index: usize) -> Option<&str> {
        match index {
            0 => None,
            _ => self.colors.get(index).map(|s| s.as_str()),
        }
    }

    /// Number of slots including the reserved one
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.len() <= 1
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
    }
}
