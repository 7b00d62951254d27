//! Tokenize a document into themed tokens
//!
//! Each line is run through the grammar's packed tokenizer, colors come
//! from the color map, and the grammar's continuation state is carried to
//! the next line. With an analyzer, semantic spans are then spliced in on
//! top of the grammar tokens.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::grammar::{Grammar, ScopedToken};
use crate::metadata;
use crate::semantic::{self, SemanticAnalyzer, SemanticSpan, SpliceStats};
use crate::theme::{explain_scopes, ColorMap, FontStyle, Theme, ThemeRuleMatcher};

/// A colored run of text within one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemedToken {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "FontStyle::is_none")]
    pub font_style: FontStyle,
    /// Grammar tokens covered by this token, when explanations were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<TokenExplanation>>,
}

impl ThemedToken {
    pub fn new(content: &str, color: Option<&str>) -> Self {
        Self {
            content: content.to_string(),
            color: color.map(str::to_string),
            font_style: FontStyle::NONE,
            explanation: None,
        }
    }

    /// Builder: set the font style
    pub fn with_font_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = font_style;
        self
    }

    /// A piece of this token with the same style
    pub(crate) fn piece(&self, content: &str) -> Self {
        Self {
            content: content.to_string(),
            color: self.color.clone(),
            font_style: self.font_style,
            explanation: self.explanation.clone(),
        }
    }
}

/// One grammar token inside a themed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenExplanation {
    pub content: String,
    pub scopes: Vec<TokenScopeExplanation>,
}

/// Theme rules touching one scope of a grammar token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenScopeExplanation {
    pub scope_name: String,
    /// Labels of the matching rules, in theme order
    pub theme_matches: Vec<String>,
}

/// Split text on `\r\n`, `\r` and `\n`
///
/// A trailing terminator yields a trailing empty line; empty text is one
/// empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Per-session tokenizer options
#[derive(Debug, Clone)]
pub struct TokenizeOptions {
    /// Attach scope explanations to every token
    pub explain: bool,
    /// Flags passed to the semantic analyzer
    pub analyzer_flags: Vec<String>,
    /// Where the document is written for the analyzer (system temp dir if unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            explain: false,
            analyzer_flags: semantic::DEFAULT_ANALYZER_FLAGS.iter().map(|s| s.to_string()).collect(),
            temp_dir: None,
        }
    }
}

/// A highlighting session over one theme
///
/// Owns the rule matcher, so rule lookups are cached across every document
/// tokenized with the same session.
#[derive(Debug)]
pub struct ThemedTokenizer<'t> {
    theme: &'t Theme,
    color_map: &'t ColorMap,
    matcher: ThemeRuleMatcher<'t>,
    options: TokenizeOptions,
    stats: SpliceStats,
}

impl<'t> ThemedTokenizer<'t> {
    pub fn new(theme: &'t Theme, color_map: &'t ColorMap) -> Self {
        Self::with_options(theme, color_map, TokenizeOptions::default())
    }

    pub fn with_options(theme: &'t Theme, color_map: &'t ColorMap, options: TokenizeOptions) -> Self {
        Self {
            theme,
            color_map,
            matcher: ThemeRuleMatcher::new(&theme.rules),
            options,
            stats: SpliceStats::default(),
        }
    }

    /// Semantic splice outcomes so far
    pub fn splice_stats(&self) -> SpliceStats {
        self.stats
    }

    /// Tokenize a whole document
    ///
    /// Returns one token list per line. `language_id` names the source file
    /// handed to `analyzer`; semantic splicing runs only when an analyzer
    /// is given, and its failure fails the call.
    pub fn tokenize<G: Grammar>(
        &mut self,
        text: &str,
        grammar: &G,
        language_id: &str,
        analyzer: Option<&dyn SemanticAnalyzer>,
    ) -> Result<Vec<Vec<ThemedToken>>> {
        let lines = split_lines(text);

        let semantic_lines = match analyzer {
            Some(analyzer) => {
                let path = semantic::materialize_source(text, language_id, self.options.temp_dir.as_deref())?;
                let records = analyzer.analyze(&path, &self.options.analyzer_flags)?;
                Some(semantic::group_by_line(records, lines.len()))
            }
            None => None,
        };

        let mut state: Option<G::State> = None;
        let mut result = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                result.push(Vec::new());
                continue;
            }

            let packed = grammar.tokenize_line_packed(line, state.as_ref());
            let scoped = if self.options.explain {
                Some(grammar.tokenize_line(line, state.as_ref()).tokens)
            } else {
                None
            };
            let mut tokens = self.themed_tokens(line, &packed.tokens, scoped.as_deref());

            let spans: Option<&Vec<SemanticSpan>> = semantic_lines.as_ref().and_then(|lines| lines.get(index));
            if let Some(spans) = spans.filter(|spans| !spans.is_empty()) {
                tokens = semantic::splice(line, tokens, spans, &mut self.matcher, &mut self.stats);
            }

            tracing::trace!(line = index, tokens = tokens.len(), "tokenized line");
            result.push(tokens);
            state = Some(packed.state);
        }
        Ok(result)
    }

    fn themed_tokens(&self, line: &str, packed: &[u32], scoped: Option<&[ScopedToken]>) -> Vec<ThemedToken> {
        let count = packed.len() / 2;
        let mut tokens = Vec::with_capacity(count);
        let mut scoped_index = 0;
        for j in 0..count {
            let start = packed[2 * j] as usize;
            let end = if j + 1 < count { packed[2 * j + 2] as usize } else { line.len() };
            if start >= end {
                continue;
            }
            let Some(content) = line.get(start..end) else {
                tracing::debug!(start, end, len = line.len(), "packed token outside line, dropped");
                continue;
            };

            let metadata = packed[2 * j + 1];
            let color = self.color_map.get(metadata::foreground_color_index(metadata));
            let mut token = ThemedToken::new(content, color).with_font_style(metadata::font_style(metadata));

            if let Some(scoped) = scoped {
                let mut explanation = Vec::new();
                while let Some(inner) = scoped.get(scoped_index) {
                    if inner.start >= end {
                        break;
                    }
                    scoped_index += 1;
                    if inner.end <= inner.start {
                        continue;
                    }
                    explanation.push(self.explain(line, inner));
                }
                token.explanation = Some(explanation);
            }
            tokens.push(token);
        }
        tokens
    }

    fn explain(&self, line: &str, token: &ScopedToken) -> TokenExplanation {
        TokenExplanation {
            content: line.get(token.start..token.end).unwrap_or_default().to_string(),
            scopes: explain_scopes(&self.theme.rules, &token.scopes)
                .into_iter()
                .map(|scope| TokenScopeExplanation {
                    scope_name: scope.scope_name,
                    theme_matches: scope.theme_matches.iter().map(|rule| rule.label()).collect(),
                })
                .collect(),
        }
    }
}

/// Tokenize `text` with a fresh session
pub fn tokenize_with_theme<G: Grammar>(
    theme: &Theme,
    color_map: &ColorMap,
    text: &str,
    grammar: &G,
    language_id: &str,
    analyzer: Option<&dyn SemanticAnalyzer>,
) -> Result<Vec<Vec<ThemedToken>>> {
    ThemedTokenizer::new(theme, color_map).tokenize(text, grammar, language_id, analyzer)
}
