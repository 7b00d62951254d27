//! Pattern rules for the built-in grammars
//!
//! This module defines the rule types used to match source text and the
//! per-line state carried across multi-line constructs.

use regex::Regex;

use super::scopes::ScopeKind;

/// A single-line pattern rule
///
/// Matches a regex pattern and assigns a scope kind to the match.
/// Rules are tried in priority order (highest first).
#[derive(Debug)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Scope kind to assign to matches
    pub kind: ScopeKind,
    /// Priority (higher = matched first)
    pub priority: i32,
}

impl PatternRule {
    /// Create a new pattern rule; `None` if the pattern does not compile
    pub fn new(name: &str, pattern: &str, kind: ScopeKind, priority: i32) -> Option<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Some(Self {
                name: name.to_string(),
                pattern: regex,
                kind,
                priority,
            }),
            Err(err) => {
                tracing::warn!(rule = name, error = %err, "dropping pattern rule");
                None
            }
        }
    }

    /// Find the first non-empty match at or after `start`
    ///
    /// Anchors are evaluated against the whole line, so `^` only matches
    /// at offset 0.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        find_non_empty(&self.pattern, text, start)
    }
}

/// A multi-line construct rule (block comments, strings)
///
/// These rules track state across lines for constructs that
/// can span multiple lines.
#[derive(Debug)]
pub struct MultilineRule {
    /// Name for debugging
    pub name: String,
    /// Pattern that starts the construct
    pub start: Regex,
    /// Pattern that ends the construct
    pub end: Regex,
    /// Scope kind for this construct
    pub kind: ScopeKind,
    /// Escape character (usually backslash)
    pub escape_char: Option<char>,
    /// Unique ID for this multiline state (1-255, 0 = normal)
    pub state_id: u8,
}

impl MultilineRule {
    /// Create a new multiline rule
    pub fn new(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        kind: ScopeKind,
        state_id: u8,
    ) -> Option<Self> {
        let compiled = Regex::new(start_pattern).and_then(|start| Ok((start, Regex::new(end_pattern)?)));
        match compiled {
            Ok((start, end)) => Some(Self {
                name: name.to_string(),
                start,
                end,
                kind,
                escape_char: None,
                state_id,
            }),
            Err(err) => {
                tracing::warn!(rule = name, error = %err, "dropping multiline rule");
                None
            }
        }
    }

    /// Create a multiline rule with escape support
    pub fn with_escape(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        kind: ScopeKind,
        state_id: u8,
        escape_char: char,
    ) -> Option<Self> {
        let mut rule = Self::new(name, start_pattern, end_pattern, kind, state_id)?;
        rule.escape_char = Some(escape_char);
        Some(rule)
    }

    /// Find start of this construct at or after `start`
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        find_non_empty(&self.start, text, start)
    }

    /// Find the offset just past the end of this construct, respecting escapes
    ///
    /// Only escape characters between `start` and the candidate terminator
    /// are counted.
    pub fn find_end(&self, text: &str, start: usize) -> Option<usize> {
        if start >= text.len() {
            return None;
        }

        let Some(escape) = self.escape_char else {
            return self.end.find_at(text, start).map(|m| m.end());
        };

        let mut pos = start;
        while pos < text.len() {
            let m = self.end.find_at(text, pos)?;
            let escapes = text[start..m.start()]
                .chars()
                .rev()
                .take_while(|&c| c == escape)
                .count();
            if escapes % 2 == 0 {
                return Some(m.end());
            }
            // Odd number of escapes = escaped terminator, keep looking
            pos = m.end().max(m.start() + 1);
            while pos < text.len() && !text.is_char_boundary(pos) {
                pos += 1;
            }
        }
        None
    }
}

fn find_non_empty(regex: &Regex, text: &str, start: usize) -> Option<(usize, usize)> {
    let mut pos = start;
    while pos < text.len() {
        let m = regex.find_at(text, pos)?;
        if !m.is_empty() {
            return Some((m.start(), m.end()));
        }
        // Empty match: retry from the next character
        pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Line state for tracking multi-line constructs
///
/// This is the grammar's continuation state: the value returned for one
/// line is passed unchanged into the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineState {
    /// 0 = normal, non-zero = inside multiline rule with this ID
    pub multiline_id: u8,
}

impl LineState {
    /// Create state for being inside a multiline construct
    pub fn inside(state_id: u8) -> Self {
        Self {
            multiline_id: state_id,
        }
    }

    /// Check if we're inside a multiline construct
    pub fn is_inside_multiline(&self) -> bool {
        self.multiline_id != 0
    }

    /// Check if we're in normal (no multiline) state
    pub fn is_normal(&self) -> bool {
        self.multiline_id == 0
    }
}
