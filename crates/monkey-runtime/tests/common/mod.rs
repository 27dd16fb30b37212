//! Shared test utilities
//!
//! Helpers that evaluate a snippet in a fresh runtime and check the result,
//! so individual tests stay one line long.

#![allow(dead_code)]

use monkey_runtime::{Diagnostic, Monkey, Value};
use pretty_assertions::assert_eq;

/// Evaluate `source` in a fresh runtime, panicking on parse errors
pub fn eval(source: &str) -> Value {
    match Monkey::new().eval(source) {
        Ok(value) => value,
        Err(diags) => panic!("Parse errors for {:?}: {:?}", source, messages(&diags)),
    }
}

/// Parse `source` and return its canonical string form
pub fn canonical(source: &str) -> String {
    match Monkey::parse(source) {
        Ok(program) => program.to_string(),
        Err(diags) => panic!("Parse errors for {:?}: {:?}", source, messages(&diags)),
    }
}

/// Messages of all parse diagnostics for `source`
pub fn parse_errors(source: &str) -> Vec<String> {
    match Monkey::parse(source) {
        Ok(program) => panic!("Expected parse errors, got {:?}", program.to_string()),
        Err(diags) => messages(&diags),
    }
}

pub fn messages(diags: &[Diagnostic]) -> Vec<String> {
    diags.iter().map(|d| d.message.clone()).collect()
}

/// Assert that source code evaluates to an integer
///
/// # Example
/// ```text
/// assert_eval_integer("1 + 2", 3);
/// ```
pub fn assert_eval_integer(source: &str, expected: i64) {
    match eval(source) {
        Value::Integer(n) => assert_eq!(n, expected, "source: {}", source),
        other => panic!("Expected Integer({}) for {:?}, got {:?}", expected, source, other),
    }
}

/// Assert that source code evaluates to a boolean
pub fn assert_eval_bool(source: &str, expected: bool) {
    match eval(source) {
        Value::Boolean(b) => assert_eq!(b, expected, "source: {}", source),
        other => panic!("Expected Boolean({}) for {:?}, got {:?}", expected, source, other),
    }
}

/// Assert that source code evaluates to a string
pub fn assert_eval_string(source: &str, expected: &str) {
    match eval(source) {
        Value::String(s) => assert_eq!(s.as_str(), expected, "source: {}", source),
        other => panic!("Expected String({:?}) for {:?}, got {:?}", expected, source, other),
    }
}

/// Assert that source code evaluates to null
pub fn assert_eval_null(source: &str) {
    match eval(source) {
        Value::Null => {}
        other => panic!("Expected Null for {:?}, got {:?}", source, other),
    }
}

/// Assert that source code evaluates to an error with the given message
///
/// # Example
/// ```text
/// assert_eval_error("5 + true", "type mismatch: INTEGER + BOOLEAN");
/// ```
pub fn assert_eval_error(source: &str, expected: &str) {
    match eval(source) {
        Value::Error(message) => assert_eq!(message, expected, "source: {}", source),
        other => panic!("Expected Error({:?}) for {:?}, got {:?}", expected, source, other),
    }
}

/// Assert that source code evaluates to a value with the given display form
pub fn assert_eval_inspect(source: &str, expected: &str) {
    let value = eval(source);
    assert_eq!(value.inspect(), expected, "source: {}", source);
}
