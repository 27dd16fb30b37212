//! End-to-end tests for the `monkey` binary
//!
//! Each test writes a script to a temporary directory and checks the
//! output and exit status of one subcommand.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a temporary directory with a test file
fn create_test_file(filename: &str, content: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    (temp_dir, file_path.to_str().unwrap().to_string())
}

fn monkey() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("monkey");
    cmd.env_remove("MONKEY_DIAGNOSTICS")
        .env_remove("MONKEY_LOG")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// monkey run
// ============================================================================

#[test]
fn test_run_prints_result() {
    let (_dir, path) = create_test_file("test.mk", "1 + 2 * 3;");

    monkey()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_run_closures_and_builtins() {
    let source = r#"
let map = fn(arr, f) {
    let iter = fn(arr, acc) {
        if (len(arr) == 0) { acc } else { iter(rest(arr), push(acc, f(first(arr)))) }
    };
    iter(arr, []);
};
map([1, 2, 3], fn(x) { x * x });
"#;
    let (_dir, path) = create_test_file("map.mk", source);

    monkey()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout("[1, 4, 9]\n");
}

#[test]
fn test_run_null_result_prints_nothing() {
    let (_dir, path) = create_test_file("test.mk", "let x = 1;");

    monkey().arg("run").arg(&path).assert().success().stdout("");
}

#[test]
fn test_run_puts_writes_stdout() {
    let (_dir, path) = create_test_file("test.mk", r#"puts("hello", 42);"#);

    monkey()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout("hello\n42\n");
}

#[test]
fn test_run_alias() {
    let (_dir, path) = create_test_file("test.mk", r#""hi" + "!""#);

    monkey().arg("r").arg(&path).assert().success().stdout("hi!\n");
}

#[test]
fn test_run_evaluation_error_exits_nonzero() {
    let (_dir, path) = create_test_file("test.mk", "let x = 5; x + true;");

    monkey()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "ERROR: type mismatch: INTEGER + BOOLEAN",
        ));
}

#[test]
fn test_run_parse_error_exits_nonzero() {
    let (_dir, path) = create_test_file("bad.mk", "let x 5;\n");

    monkey()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[MK1001]"))
        .stderr(predicate::str::contains(
            "expected next token to be =, got INT instead",
        ))
        .stderr(predicate::str::contains("bad.mk:1:7"));
}

#[test]
fn test_run_parse_error_json() {
    let (_dir, path) = create_test_file("bad.mk", "let = 1; #");

    let output = monkey()
        .arg("run")
        .arg(&path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let json_start = stderr.find('[').unwrap();
    let json_end = stderr.rfind(']').unwrap();
    let diagnostics: serde_json::Value =
        serde_json::from_str(&stderr[json_start..=json_end]).unwrap();

    let diagnostics = diagnostics.as_array().unwrap();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0]["code"], "MK1001");
    assert_eq!(diagnostics[1]["code"], "MK1002");
    assert_eq!(
        diagnostics[1]["message"],
        "no prefix parse function for ILLEGAL found"
    );
}

#[test]
fn test_run_json_from_environment() {
    let (_dir, path) = create_test_file("bad.mk", "let = 1;");

    monkey()
        .env("MONKEY_DIAGNOSTICS", "json")
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\": \"MK1001\""));
}

#[test]
fn test_run_missing_file() {
    monkey()
        .arg("run")
        .arg("does-not-exist.mk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read source file"));
}

#[test]
fn test_run_logging_goes_to_stderr() {
    let (_dir, path) = create_test_file("test.mk", "let f = fn(x) { x }; f(3)");

    monkey()
        .env("MONKEY_LOG", "monkey_runtime=trace")
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout("3\n");
}

// ============================================================================
// monkey ast / tokens
// ============================================================================

#[test]
fn test_ast_prints_canonical_form() {
    let (_dir, path) = create_test_file("test.mk", "let x = 3 + 4 * 5 == 3 * 1 + 4 * 5;\n-a");

    monkey()
        .arg("ast")
        .arg(&path)
        .assert()
        .success()
        .stdout("let x = ((3+(4*5))==((3*1)+(4*5)));\n(-a)\n");
}

#[test]
fn test_ast_json() {
    let (_dir, path) = create_test_file("test.mk", "let x = 1;");

    let output = monkey().arg("ast").arg(&path).arg("--json").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ast_version"], 1);
    assert_eq!(json["statements"].as_array().unwrap().len(), 1);
}

#[test]
fn test_ast_parse_error() {
    let (_dir, path) = create_test_file("test.mk", "fn(1) {}");

    monkey()
        .arg("ast")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected next token to be IDENT, got INT instead",
        ));
}

#[test]
fn test_tokens_lists_every_token() {
    let (_dir, path) = create_test_file("test.mk", "let x = \"hi\";");

    monkey().arg("tokens").arg(&path).assert().success().stdout(
        "Literal: let, Type: LET\n\
         Literal: x, Type: IDENT\n\
         Literal: =, Type: =\n\
         Literal: hi, Type: STRING\n\
         Literal: ;, Type: ;\n\
         Literal: , Type: EOF\n",
    );
}

// ============================================================================
// monkey repl
// ============================================================================

#[test]
fn test_help_mentions_subcommands() {
    monkey()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("tokens"));
}
