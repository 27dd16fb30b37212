pub mod ast;
pub mod repl;
pub mod run;
pub mod tokens;

use anyhow::{Context, Result};
use monkey_runtime::Diagnostic;
use std::fs;

/// Read a source file, naming it in the error
pub fn read_source(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))
}

/// Print parse diagnostics to stderr, as a JSON array or human-readable
pub fn print_diagnostics(diagnostics: &[Diagnostic], file_path: &str, json: bool) -> Result<()> {
    let diagnostics: Vec<Diagnostic> = diagnostics
        .iter()
        .cloned()
        .map(|diag| diag.with_file(file_path))
        .collect();

    if json {
        eprintln!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        for diag in &diagnostics {
            eprint!("{}", diag.to_human_string());
        }
    }
    Ok(())
}
