//! Analyzer that runs an external program

use std::path::Path;
use std::process::Command;

use crate::error::{HighlightError, Result};

use super::{parse_analyzer_output, SemanticAnalyzer, SemanticRecord};

/// Runs `program [args..] [flags..] <file>` and reads JSON records from stdout
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    /// Builder: fixed arguments placed before the flags
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SemanticAnalyzer for CommandAnalyzer {
    fn analyze(&self, source: &Path, flags: &[String]) -> Result<Vec<SemanticRecord>> {
        tracing::debug!(program = %self.program, file = %source.display(), "running semantic analyzer");
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(flags)
            .arg(source)
            .output()
            .map_err(|e| HighlightError::Analyzer(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HighlightError::Analyzer(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let records = parse_analyzer_output(&stdout)?;
        tracing::debug!(records = records.len(), "semantic analyzer finished");
        Ok(records)
    }
}
