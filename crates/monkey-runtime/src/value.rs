//! Runtime value representation
//!
//! - Integers, Booleans, Null: immediate values
//! - Strings: heap-allocated, reference-counted (`Rc<String>`), immutable
//! - Arrays and Hashes: reference-counted and never mutated after creation
//! - Functions: parameters and body plus the environment they were defined in
//! - ReturnValue: wraps the value of a `return` while it unwinds enclosing blocks
//! - Error: the message of a failed evaluation

use crate::ast::{BlockStatement, Identifier, InfixOperator, PrefixOperator};
use crate::environment::Env;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use thiserror::Error;

/// Signature of native functions callable from Monkey code
pub type BuiltinFn = fn(&[Value]) -> Result<Value, RuntimeError>;

/// Runtime type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::String => "STRING",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key under which a hashable value is stored in a hash
///
/// Only depends on the value's type and contents, so two separately created
/// values that are equal produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: ObjectType,
    pub value: u64,
}

/// Original key and its value, kept for display
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Hash contents in insertion order
#[derive(Debug, Clone, Default)]
pub struct HashValue {
    pairs: Vec<HashPair>,
    index: HashMap<HashKey, usize>,
}

impl HashValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: HashKey, pair: HashPair) {
        match self.index.get(&key) {
            Some(&slot) => self.pairs[slot] = pair,
            None => {
                self.index.insert(key, self.pairs.len());
                self.pairs.push(pair);
            }
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.index.get(key).map(|&slot| &self.pairs[slot])
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &HashPair> {
        self.pairs.iter()
    }
}

impl PartialEq for HashValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .index
                .iter()
                .all(|(key, &slot)| other.get(key) == Some(&self.pairs[slot]))
    }
}

/// A user-defined function closed over its defining environment
pub struct FunctionValue {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

impl fmt::Debug for FunctionValue {
    // The environment may contain this very function, so it is not printed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.value.as_str()).collect();
        f.debug_struct("FunctionValue")
            .field("parameters", &params)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// A native function
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    String(Rc<String>),
    Array(Rc<Vec<Value>>),
    Hash(Rc<HashValue>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
    ReturnValue(Box<Value>),
    Error(String),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::new(s.into()))
    }

    /// Create a new array value
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(values))
    }

    /// Runtime type tag
    pub fn object_type(&self) -> ObjectType {
        match self {
            Value::Integer(_) => ObjectType::Integer,
            Value::Boolean(_) => ObjectType::Boolean,
            Value::Null => ObjectType::Null,
            Value::String(_) => ObjectType::String,
            Value::Array(_) => ObjectType::Array,
            Value::Hash(_) => ObjectType::Hash,
            Value::Function(_) => ObjectType::Function,
            Value::Builtin(_) => ObjectType::Builtin,
            Value::ReturnValue(_) => ObjectType::ReturnValue,
            Value::Error(_) => ObjectType::Error,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        self.object_type().as_str()
    }

    /// `null` and `false` are falsy; every other value is truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Key for using this value in a hash
    ///
    /// Only integers, booleans and strings are hashable.
    pub fn hash_key(&self) -> Result<HashKey, RuntimeError> {
        let value = match self {
            Value::Integer(n) => *n as u64,
            Value::Boolean(b) => u64::from(*b),
            Value::String(s) => {
                let mut hasher = DefaultHasher::new();
                s.as_str().hash(&mut hasher);
                hasher.finish()
            }
            other => return Err(RuntimeError::UnusableAsHashKey(other.object_type())),
        };

        Ok(HashKey {
            kind: self.object_type(),
            value,
        })
    }

    /// Display form shown by the REPL
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::String(s) => f.write_str(s),
            Value::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Hash(hash) => {
                let pairs: Vec<String> = hash
                    .iter()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Value::Function(func) => {
                let params: Vec<&str> = func.parameters.iter().map(|p| p.value.as_str()).collect();
                write!(f, "fn({}) {{\n{}\n}}", params.join(", "), func.body)
            }
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::ReturnValue(inner) => write!(f, "{}", inner),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

// Structural equality for host code and tests. Functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl From<RuntimeError> for Value {
    fn from(err: RuntimeError) -> Self {
        Value::Error(err.to_string())
    }
}

/// Evaluation error
///
/// The `Display` text of each variant is the message carried by the
/// resulting [`Value::Error`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },

    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: ObjectType,
    },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("not a function: {0}")]
    NotAFunction(ObjectType),

    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(ObjectType),

    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),

    #[error("wrong number of arguments. Got {got}, expected {expected}")]
    WrongArgumentCount { got: usize, expected: usize },

    #[error("argument to '{name}' not supported, got {got}")]
    UnsupportedArgument { name: &'static str, got: ObjectType },
}
