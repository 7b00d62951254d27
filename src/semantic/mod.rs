//! Semantic tokens from an external analyzer
//!
//! An analyzer reads a source file and reports finer-grained token spans
//! than the grammar, each with its own scope list. The tokenizer writes the
//! document to a content-addressed temp file, runs the analyzer once, groups
//! the records by line, and splices them into the grammar tokens (see
//! [`splice`]).

mod command;
pub mod splice;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::{HighlightError, Result};

pub use command::CommandAnalyzer;
pub use splice::{splice, SpliceStats};

/// Flags passed to an analyzer when none are configured
pub const DEFAULT_ANALYZER_FLAGS: &[&str] = &["-log=verbose"];

/// One analyzer token: a byte range of one line plus its scopes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticRecord {
    /// Zero-based line index
    pub line: usize,
    pub start_index: usize,
    pub end_index: usize,
    /// Scopes in priority order
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// A semantic token within one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticSpan {
    pub start: usize,
    pub end: usize,
    pub scopes: Vec<String>,
}

impl SemanticSpan {
    pub fn new(start: usize, end: usize, scopes: &[&str]) -> Self {
        Self {
            start,
            end,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Source of semantic tokens for a whole file
pub trait SemanticAnalyzer {
    /// Analyze the file at `source`, returning its tokens in any order
    fn analyze(&self, source: &Path, flags: &[String]) -> Result<Vec<SemanticRecord>>;
}

/// Analyzer backed by a fixed list of records
///
/// Ignores the file it is given; useful for tests and for records computed
/// ahead of time.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    records: Vec<SemanticRecord>,
}

impl StaticAnalyzer {
    pub fn new(records: Vec<SemanticRecord>) -> Self {
        Self { records }
    }
}

impl SemanticAnalyzer for StaticAnalyzer {
    fn analyze(&self, _source: &Path, _flags: &[String]) -> Result<Vec<SemanticRecord>> {
        Ok(self.records.clone())
    }
}

/// Group records into per-line span lists
///
/// Spans are ordered by start offset within each line. Records naming a
/// line past `line_count` are dropped.
pub fn group_by_line(records: Vec<SemanticRecord>, line_count: usize) -> Vec<Vec<SemanticSpan>> {
    let mut lines: Vec<Vec<SemanticSpan>> = vec![Vec::new(); line_count];
    for record in records {
        match lines.get_mut(record.line) {
            Some(spans) => spans.push(SemanticSpan {
                start: record.start_index,
                end: record.end_index,
                scopes: record.scopes,
            }),
            None => {
                tracing::debug!(line = record.line, line_count, "semantic record past end of document");
            }
        }
    }
    for spans in &mut lines {
        spans.sort_by_key(|span| span.start);
    }
    lines
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyzerOutput {
    Grouped(Vec<LineGroup>),
    Flat(Vec<SemanticRecord>),
}

#[derive(Debug, Deserialize)]
struct LineGroup {
    line: usize,
    tokens: Vec<GroupedToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupedToken {
    start_index: usize,
    end_index: usize,
    #[serde(default)]
    scopes: Vec<String>,
}

/// Decode analyzer JSON output
///
/// Accepts a flat array of records or an array of `{ line, tokens }`
/// groups.
pub fn parse_analyzer_output(output: &str) -> Result<Vec<SemanticRecord>> {
    let parsed: AnalyzerOutput = serde_json::from_str(output)
        .map_err(|e| HighlightError::Analyzer(format!("undecodable output: {e}")))?;
    Ok(match parsed {
        AnalyzerOutput::Flat(records) => records,
        AnalyzerOutput::Grouped(groups) => groups
            .into_iter()
            .flat_map(|group| {
                let line = group.line;
                group.tokens.into_iter().map(move |token| SemanticRecord {
                    line,
                    start_index: token.start_index,
                    end_index: token.end_index,
                    scopes: token.scopes,
                })
            })
            .collect(),
    })
}

/// File name for a document: first 8 hex chars of its SHA-256, then the language
pub fn source_file_name(text: &str, language_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash_bytes = hasher.finalize();
    format!("{}.{}", hex::encode(&hash_bytes[..4]), language_id)
}

/// Write the document where an analyzer can read it
///
/// Uses the system temp directory unless `dir` is given. Identical content
/// maps to the same path, so rewriting is harmless.
pub fn materialize_source(text: &str, language_id: &str, dir: Option<&Path>) -> Result<PathBuf> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
    let path = dir.join(source_file_name(text, language_id));
    fs::write(&path, text)?;
    tracing::debug!(path = %path.display(), "materialized source for analyzer");
    Ok(path)
}
