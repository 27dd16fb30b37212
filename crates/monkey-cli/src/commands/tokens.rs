//! Token dump command

use anyhow::Result;
use monkey_runtime::Lexer;

/// Print every token of a file, including the final EOF
pub fn run(file_path: &str) -> Result<()> {
    let source = super::read_source(file_path)?;

    for token in Lexer::new(&source).tokenize() {
        println!("{}", token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_tokens_never_fail_on_bad_input() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "let @ = \"open").unwrap();

        assert!(run(temp_file.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_tokens_missing_file() {
        assert!(run("nonexistent.mk").is_err());
    }
}
