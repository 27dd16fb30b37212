//! Monkey Runtime - Core language implementation
//!
//! This library provides the complete Monkey language runtime:
//! - Lexical analysis and Pratt parsing into an AST
//! - A tree-walking interpreter with closures, arrays and hashes
//! - Builtin functions
//! - An embedding API and a UI-agnostic REPL core
//!
//! ```
//! use monkey_runtime::{Monkey, Value};
//!
//! let runtime = Monkey::new();
//! let result = runtime.eval("let add = fn(x) { fn(y) { x + y } }; add(2)(3)");
//! assert_eq!(result, Ok(Value::Integer(5)));
//! ```

/// Monkey runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod span;
pub mod stdlib;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{AstNode, Node, Program, VersionedProgram, AST_VERSION};
pub use diagnostic::{error_codes, Diagnostic, DIAG_VERSION};
pub use environment::{Env, Environment};
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use parser::Parser;
pub use repl::{ReplCore, ReplResult};
pub use runtime::{Monkey, RuntimeResult};
pub use span::Span;
pub use stdlib::Builtins;
pub use token::{Token, TokenKind};
pub use value::{HashKey, ObjectType, RuntimeError, Value};
