//! Language definitions for the built-in grammars
//!
//! A [`LanguageDefinition`] combines pattern rules and multiline rules for one
//! language. Binding it to a theme yields a [`ThemedGrammar`], which knows
//! the packed metadata of every rule and implements [`Grammar`].

use crate::metadata::{self, StandardTokenType};
use crate::theme::{ColorMap, FontStyle, Theme, ThemeRuleMatcher};

use super::rules::{LineState, MultilineRule, PatternRule};
use super::scopes::ScopeKind;
use super::{Grammar, LineTokens, PackedLineTokens, ScopedToken};

/// A complete language definition for syntax highlighting
#[derive(Debug)]
pub struct LanguageDefinition {
    /// Language id used for lookups (e.g., "rust", "python")
    pub id: String,
    /// Display name (e.g., "Rust")
    pub name: String,
    /// Root scope (e.g., "source.rust")
    pub scope_name: String,
    /// Suffix appended to rule scopes (e.g., "rust")
    pub scope_suffix: String,
    /// Numeric id embedded in packed metadata
    pub language_id: u32,
    /// File extensions (e.g., ["rs"], ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Alternative ids (e.g., ["rs"])
    pub aliases: Vec<String>,
    /// Single-line pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
    /// Multi-line rules for comments, strings, etc.
    pub multiline_rules: Vec<MultilineRule>,
}

/// Which rule produced a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleRef {
    Root,
    Pattern(usize),
    Multiline(usize),
}

/// A scanned piece of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    start: usize,
    end: usize,
    rule: RuleRef,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(id: &str, name: &str, scope_suffix: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            scope_name: format!("source.{scope_suffix}"),
            scope_suffix: scope_suffix.to_string(),
            language_id: 0,
            extensions: Vec::new(),
            aliases: Vec::new(),
            patterns: Vec::new(),
            multiline_rules: Vec::new(),
        }
    }

    /// Builder: override the root scope (e.g. `text.html.markdown`)
    pub fn with_scope_name(mut self, scope_name: &str) -> Self {
        self.scope_name = scope_name.to_string();
        self
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add an alternative language id
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// Add a pattern rule
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
        // Keep sorted by priority (highest first)
        self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a multiline rule
    pub fn add_multiline(&mut self, rule: MultilineRule) {
        self.multiline_rules.push(rule);
    }

    /// Full scope name for a kind in this language
    pub fn scope_for(&self, kind: ScopeKind) -> String {
        kind.scope(&self.scope_suffix)
    }

    /// Bind this language to a theme, precomputing packed metadata
    pub fn bind<'g>(&'g self, theme: &Theme, color_map: &ColorMap) -> ThemedGrammar<'g> {
        let mut matcher = ThemeRuleMatcher::new(&theme.rules);
        let default_fg = color_map
            .id_of(theme.default_foreground())
            .unwrap_or(ColorMap::DEFAULT_FOREGROUND_ID);
        let default_bg = color_map
            .id_of(theme.default_background())
            .unwrap_or(ColorMap::DEFAULT_BACKGROUND_ID);

        let mut metadata_for = |scopes: &[String]| -> u32 {
            let mut foreground = None;
            let mut font_style = None;
            for scope in scopes.iter().rev() {
                let rule = matcher.best_rule(scope);
                if rule.is_empty_rule() {
                    continue;
                }
                if font_style.is_none() {
                    font_style = Some(rule.style.font_style);
                }
                if foreground.is_none() {
                    // ids past the 9-bit field cannot be packed
                    foreground = rule
                        .foreground()
                        .and_then(|c| color_map.id_of(c))
                        .filter(|&id| id <= metadata::MAX_COLOR_INDEX);
                }
            }
            let innermost = scopes.last().map(String::as_str).unwrap_or_default();
            metadata::pack(
                self.language_id,
                StandardTokenType::for_scope(innermost),
                font_style.unwrap_or(FontStyle::NONE),
                foreground.unwrap_or(default_fg),
                default_bg,
            )
        };

        let root_metadata = metadata_for(&self.scopes_for(RuleRef::Root));
        let pattern_metadata = (0..self.patterns.len())
            .map(|i| metadata_for(&self.scopes_for(RuleRef::Pattern(i))))
            .collect();
        let multiline_metadata = (0..self.multiline_rules.len())
            .map(|i| metadata_for(&self.scopes_for(RuleRef::Multiline(i))))
            .collect();

        tracing::debug!(language = %self.id, theme = %theme.name, "bound grammar to theme");
        ThemedGrammar {
            language: self,
            root_metadata,
            pattern_metadata,
            multiline_metadata,
        }
    }

    fn scopes_for(&self, rule: RuleRef) -> Vec<String> {
        let kind = match rule {
            RuleRef::Root => return vec![self.scope_name.clone()],
            RuleRef::Pattern(i) => self.patterns[i].kind,
            RuleRef::Multiline(i) => self.multiline_rules[i].kind,
        };
        vec![self.scope_name.clone(), self.scope_for(kind)]
    }

    fn multiline_index(&self, state_id: u8) -> Option<usize> {
        self.multiline_rules.iter().position(|r| r.state_id == state_id)
    }

    /// Split a line into segments covering it end to end
    ///
    /// Takes the state from the previous line and returns the state for
    /// the next one.
    fn scan(&self, text: &str, prev_state: LineState) -> (Vec<Segment>, LineState) {
        let mut segments = Vec::new();
        if text.is_empty() {
            return (segments, prev_state);
        }
        let mut pos = 0;

        // Finish a construct left open by the previous line
        if prev_state.is_inside_multiline() {
            match self.multiline_index(prev_state.multiline_id) {
                Some(index) => match self.multiline_rules[index].find_end(text, 0) {
                    Some(end) => {
                        segments.push(Segment { start: 0, end, rule: RuleRef::Multiline(index) });
                        pos = end;
                    }
                    None => {
                        segments.push(Segment { start: 0, end: text.len(), rule: RuleRef::Multiline(index) });
                        return (segments, prev_state);
                    }
                },
                None => {
                    tracing::debug!(language = %self.id, state = prev_state.multiline_id, "unknown line state, resetting");
                }
            }
        }

        while pos < text.len() {
            let Some((start, end, rule)) = self.next_match(text, pos) else {
                segments.push(Segment { start: pos, end: text.len(), rule: RuleRef::Root });
                break;
            };
            if start > pos {
                segments.push(Segment { start: pos, end: start, rule: RuleRef::Root });
            }
            match rule {
                RuleRef::Multiline(index) => {
                    let ml = &self.multiline_rules[index];
                    match ml.find_end(text, end) {
                        Some(close) => {
                            segments.push(Segment { start, end: close, rule });
                            pos = close;
                        }
                        None => {
                            // Multiline continues to next line
                            segments.push(Segment { start, end: text.len(), rule });
                            return (segments, LineState::inside(ml.state_id));
                        }
                    }
                }
                _ => {
                    segments.push(Segment { start, end, rule });
                    pos = end;
                }
            }
        }

        (segments, LineState::default())
    }

    /// Earliest match at or after `pos`
    ///
    /// Ties on position go to multiline openers, then to pattern priority.
    fn next_match(&self, text: &str, pos: usize) -> Option<(usize, usize, RuleRef)> {
        let mut best: Option<(usize, usize, RuleRef)> = None;
        let mut consider = |start: usize, end: usize, rule: RuleRef| {
            if best.map_or(true, |(best_start, _, _)| start < best_start) {
                best = Some((start, end, rule));
            }
        };
        for (index, rule) in self.multiline_rules.iter().enumerate() {
            if let Some((start, end)) = rule.find_start(text, pos) {
                consider(start, end, RuleRef::Multiline(index));
            }
        }
        for (index, rule) in self.patterns.iter().enumerate() {
            if let Some((start, end)) = rule.find_at(text, pos) {
                consider(start, end, RuleRef::Pattern(index));
            }
        }
        best
    }
}

/// A language bound to one theme and color map
#[derive(Debug)]
pub struct ThemedGrammar<'g> {
    language: &'g LanguageDefinition,
    root_metadata: u32,
    pattern_metadata: Vec<u32>,
    multiline_metadata: Vec<u32>,
}

impl ThemedGrammar<'_> {
    /// The underlying language definition
    pub fn language(&self) -> &LanguageDefinition {
        self.language
    }

    fn metadata_of(&self, rule: RuleRef) -> u32 {
        match rule {
            RuleRef::Root => self.root_metadata,
            RuleRef::Pattern(i) => self.pattern_metadata[i],
            RuleRef::Multiline(i) => self.multiline_metadata[i],
        }
    }
}

impl Grammar for ThemedGrammar<'_> {
    type State = LineState;

    fn scope_name(&self) -> &str {
        &self.language.scope_name
    }

    fn tokenize_line(&self, line: &str, prior: Option<&LineState>) -> LineTokens<LineState> {
        let (segments, state) = self.language.scan(line, prior.copied().unwrap_or_default());
        let tokens = if segments.is_empty() {
            vec![ScopedToken {
                start: 0,
                end: 0,
                scopes: self.language.scopes_for(RuleRef::Root),
            }]
        } else {
            segments
                .iter()
                .map(|segment| ScopedToken {
                    start: segment.start,
                    end: segment.end,
                    scopes: self.language.scopes_for(segment.rule),
                })
                .collect()
        };
        LineTokens { tokens, state }
    }

    fn tokenize_line_packed(&self, line: &str, prior: Option<&LineState>) -> PackedLineTokens<LineState> {
        let (segments, state) = self.language.scan(line, prior.copied().unwrap_or_default());
        let mut tokens: Vec<u32> = Vec::with_capacity(segments.len() * 2);
        for segment in &segments {
            let metadata = self.metadata_of(segment.rule);
            // Neighbours that render identically collapse into one token
            if tokens.last() == Some(&metadata) {
                continue;
            }
            tokens.push(segment.start as u32);
            tokens.push(metadata);
        }
        if tokens.is_empty() {
            tokens.extend([0, self.root_metadata]);
        }
        PackedLineTokens { tokens, state }
    }
}
