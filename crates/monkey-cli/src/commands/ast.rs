//! AST dump command

use anyhow::{anyhow, Result};
use monkey_runtime::{Monkey, VersionedProgram};

/// Print the syntax tree of a file
///
/// Human mode prints one canonical line per top-level statement; JSON mode
/// prints the versioned AST.
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let source = super::read_source(file_path)?;

    match Monkey::parse(&source) {
        Ok(program) => {
            if json {
                println!("{}", VersionedProgram::new(program).to_json()?);
            } else {
                for stmt in &program.statements {
                    println!("{}", stmt);
                }
            }
            Ok(())
        }
        Err(diagnostics) => {
            super::print_diagnostics(&diagnostics, file_path, json)?;
            Err(anyhow!("Parse errors in {}", file_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_ast_dump_simple() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "let x = 1 + 2 * 3;").unwrap();

        assert!(run(temp_file.path().to_str().unwrap(), false).is_ok());
        assert!(run(temp_file.path().to_str().unwrap(), true).is_ok());
    }

    #[test]
    fn test_ast_dump_invalid_syntax() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "let x =").unwrap();

        assert!(run(temp_file.path().to_str().unwrap(), false).is_err());
    }

    #[test]
    fn test_ast_dump_missing_file() {
        assert!(run("nonexistent.mk", false).is_err());
    }
}
