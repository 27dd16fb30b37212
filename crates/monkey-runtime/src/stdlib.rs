//! Builtin functions
//!
//! The table is built once and handed to the interpreter; it is never
//! modified afterwards. Builtins are found after the environment chain, so a
//! `let` binding with the same name hides them.

use crate::value::{Builtin, ObjectType, RuntimeError, Value};
use std::collections::HashMap;

/// Immutable name → builtin table
#[derive(Debug, Clone)]
pub struct Builtins {
    table: HashMap<&'static str, Builtin>,
}

impl Builtins {
    /// The standard set: `len`, `first`, `last`, `rest`, `push`, `puts`
    pub fn standard() -> Self {
        let builtins = [
            Builtin { name: "len", func: len },
            Builtin { name: "first", func: first },
            Builtin { name: "last", func: last },
            Builtin { name: "rest", func: rest },
            Builtin { name: "push", func: push },
            Builtin { name: "puts", func: puts },
        ];

        Self {
            table: builtins.into_iter().map(|b| (b.name, b)).collect(),
        }
    }

    /// Look up a builtin by name
    pub fn get(&self, name: &str) -> Option<Value> {
        self.table.get(name).copied().map(Value::Builtin)
    }

    /// Check if a function name is a builtin
    pub fn is_builtin(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Builtin names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.table.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_arity(args: &[Value], expected: usize) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::WrongArgumentCount {
            got: args.len(),
            expected,
        });
    }
    Ok(())
}

/// The single array argument of `name`
fn array_arg<'a>(name: &'static str, value: &'a Value) -> Result<&'a [Value], RuntimeError> {
    match value {
        Value::Array(elements) => Ok(elements.as_slice()),
        other => Err(unsupported(name, other)),
    }
}

fn unsupported(name: &'static str, value: &Value) -> RuntimeError {
    RuntimeError::UnsupportedArgument {
        name,
        got: value.object_type(),
    }
}

/// Length of a string or array
///
/// For strings, returns Unicode scalar count (not byte length).
fn len(args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity(args, 1)?;
    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.chars().count() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(unsupported("len", other)),
    }
}

/// First element of an array, or null when empty
fn first(args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity(args, 1)?;
    let elements = array_arg("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or(Value::Null))
}

/// Last element of an array, or null when empty
fn last(args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity(args, 1)?;
    let elements = array_arg("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or(Value::Null))
}

/// New array without the first element, or null when empty
fn rest(args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity(args, 1)?;
    let elements = array_arg("rest", &args[0])?;
    match elements.split_first() {
        Some((_, tail)) => Ok(Value::array(tail.to_vec())),
        None => Ok(Value::Null),
    }
}

/// New array with the second argument appended
fn push(args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity(args, 2)?;
    let elements = array_arg("push", &args[0])?;

    let mut extended = Vec::with_capacity(elements.len() + 1);
    extended.extend_from_slice(elements);
    extended.push(args[1].clone());

    Ok(Value::array(extended))
}

/// Print each argument on its own line
fn puts(args: &[Value]) -> Result<Value, RuntimeError> {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match Builtins::standard().get(name) {
            Some(Value::Builtin(builtin)) => (builtin.func)(&args),
            other => panic!("no builtin {}: {:?}", name, other),
        }
    }

    fn ints(values: &[i64]) -> Value {
        Value::array(values.iter().map(|&n| Value::Integer(n)).collect())
    }

    #[test]
    fn test_table_contents() {
        let builtins = Builtins::standard();
        assert_eq!(
            builtins.names(),
            vec!["first", "last", "len", "push", "puts", "rest"]
        );
        assert!(builtins.is_builtin("len"));
        assert!(!builtins.is_builtin("print"));
        assert_eq!(builtins.get("print"), None);
    }

    #[test]
    fn test_len() {
        assert_eq!(call("len", vec![Value::string("")]), Ok(Value::Integer(0)));
        assert_eq!(call("len", vec![Value::string("four")]), Ok(Value::Integer(4)));
        assert_eq!(call("len", vec![Value::string("héllo")]), Ok(Value::Integer(5)));
        assert_eq!(call("len", vec![ints(&[1, 2, 3])]), Ok(Value::Integer(3)));
        assert_eq!(
            call("len", vec![Value::Integer(1)]),
            Err(RuntimeError::UnsupportedArgument {
                name: "len",
                got: ObjectType::Integer
            })
        );
        assert_eq!(
            call("len", vec![Value::string("one"), Value::string("two")]),
            Err(RuntimeError::WrongArgumentCount {
                got: 2,
                expected: 1
            })
        );
    }

    #[test]
    fn test_first_last_rest() {
        let array = ints(&[1, 2, 3]);
        assert_eq!(call("first", vec![array.clone()]), Ok(Value::Integer(1)));
        assert_eq!(call("last", vec![array.clone()]), Ok(Value::Integer(3)));
        assert_eq!(call("rest", vec![array]), Ok(ints(&[2, 3])));

        let empty = ints(&[]);
        assert_eq!(call("first", vec![empty.clone()]), Ok(Value::Null));
        assert_eq!(call("last", vec![empty.clone()]), Ok(Value::Null));
        assert_eq!(call("rest", vec![empty]), Ok(Value::Null));
    }

    #[test]
    fn test_rest_of_single_element_is_empty_array() {
        assert_eq!(call("rest", vec![ints(&[1])]), Ok(ints(&[])));
    }

    #[test]
    fn test_push_leaves_argument_untouched() {
        let original = ints(&[1, 2]);
        let pushed = call("push", vec![original.clone(), Value::Integer(3)]);
        assert_eq!(pushed, Ok(ints(&[1, 2, 3])));
        assert_eq!(original, ints(&[1, 2]));
    }

    #[test]
    fn test_array_builtins_reject_other_types() {
        for name in ["first", "last", "rest"] {
            let err = call(name, vec![Value::string("abc")]).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("argument to '{}' not supported, got STRING", name)
            );
        }
        assert_eq!(
            call("push", vec![Value::Integer(1), Value::Integer(2)])
                .unwrap_err()
                .to_string(),
            "argument to 'push' not supported, got INTEGER"
        );
        assert_eq!(
            call("push", vec![ints(&[])]).unwrap_err().to_string(),
            "wrong number of arguments. Got 1, expected 2"
        );
    }

    #[test]
    fn test_puts_returns_null() {
        assert_eq!(call("puts", vec![]), Ok(Value::Null));
    }
}
