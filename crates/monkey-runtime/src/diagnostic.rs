//! Diagnostics for parse errors
//!
//! The parser reports every problem it finds as a [`Diagnostic`]. A program
//! with any diagnostics is never evaluated; evaluation errors are values
//! instead (see [`crate::value::RuntimeError`]).

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// A parse error with enough location data to render a source excerpt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic schema version
    pub diag_version: u32,
    /// Error code (e.g., "MK1001")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// File path
    pub file: String,
    /// Char offsets of the offending token
    pub span: Span,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of error span
    pub length: usize,
    /// Source line string
    pub snippet: String,
    /// Short label for caret range
    pub label: String,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic with code
    pub fn error_with_code(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            code: code.into(),
            message: message.into(),
            file: "<input>".to_string(),
            span,
            line: 1,
            column: span.start + 1,
            length: span.len(),
            snippet: String::new(),
            label: String::new(),
            help: None,
        }
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the label (caret description)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Resolve line, column and snippet from the source the span points into
    pub fn with_source(mut self, source: &str) -> Self {
        let mut line = 1;
        let mut line_start = 0;

        for (offset, c) in source.chars().enumerate() {
            if offset >= self.span.start {
                break;
            }
            if c == '\n' {
                line += 1;
                line_start = offset + 1;
            }
        }

        self.line = line;
        self.column = self.span.start - line_start + 1;
        self.snippet = source
            .lines()
            .nth(line - 1)
            .unwrap_or_default()
            .trim_end_matches('\r')
            .to_string();
        self
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = String::new();

        // Header: error[MK1001]: expected next token to be =, got INT instead
        output.push_str(&format!("error[{}]: {}\n", self.code, self.message));

        // Location: --> script.mk:3:9
        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.file, self.line, self.column
        ));

        // Snippet with caret
        if !self.snippet.is_empty() {
            output.push_str("   |\n");
            output.push_str(&format!("{:>2} | {}\n", self.line, self.snippet));

            let padding = " ".repeat(self.column.saturating_sub(1));
            let carets = "^".repeat(self.length.max(1));
            output.push_str(&format!("   | {}{}", padding, carets));

            if !self.label.is_empty() {
                output.push_str(&format!(" {}", self.label));
            }
            output.push('\n');
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("   = help: {}\n", help));
        }

        output
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Error code registry
pub mod error_codes {
    // MK1xxx - Syntax Errors
    pub const UNEXPECTED_TOKEN: &str = "MK1001";
    pub const NO_PREFIX_PARSE: &str = "MK1002";
    pub const INVALID_INTEGER: &str = "MK1003";
}
