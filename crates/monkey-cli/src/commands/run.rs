//! Run command - execute Monkey source files

use anyhow::{anyhow, Result};
use monkey_runtime::{Monkey, Value};
use tracing::debug;

/// Run a Monkey source file
///
/// Prints the value of the last statement unless it is null. Parse
/// diagnostics and evaluation errors go to stderr and fail the command.
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let source = super::read_source(file_path)?;
    debug!(file = file_path, bytes = source.len(), "running script");

    let runtime = Monkey::new();
    match runtime.eval(&source) {
        Ok(Value::Null) => Ok(()),
        Ok(error @ Value::Error(_)) => {
            eprintln!("{}", error.inspect());
            Err(anyhow!("Evaluation of {} failed", file_path))
        }
        Ok(value) => {
            println!("{}", value.inspect());
            Ok(())
        }
        Err(diagnostics) => {
            super::print_diagnostics(&diagnostics, file_path, json)?;
            Err(anyhow!(
                "Failed to parse {} ({} error(s))",
                file_path,
                diagnostics.len()
            ))
        }
    }
}
