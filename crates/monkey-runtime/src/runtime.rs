//! Monkey runtime API for embedding

use crate::ast::Program;
use crate::diagnostic::Diagnostic;
use crate::environment::{Env, Environment};
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::value::Value;
use tracing::debug;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Vec<Diagnostic>>;

/// Monkey runtime instance
///
/// Owns a global scope that persists across calls to [`Monkey::eval`], so
/// bindings made by one call are visible to the next.
///
/// # Examples
///
/// ```
/// use monkey_runtime::{Monkey, Value};
///
/// let runtime = Monkey::new();
/// runtime.eval("let double = fn(x) { x * 2 };").unwrap();
/// assert_eq!(runtime.eval("double(21)"), Ok(Value::Integer(42)));
/// ```
pub struct Monkey {
    interpreter: Interpreter,
    env: Env,
}

impl Monkey {
    /// Create a runtime with an empty global scope
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            env: Environment::new(),
        }
    }

    /// Parse and evaluate Monkey source code
    ///
    /// Parse errors are returned as diagnostics and nothing is evaluated.
    /// Evaluation errors are not diagnostics: they come back as
    /// `Ok(Value::Error(..))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use monkey_runtime::{Monkey, Value};
    ///
    /// let runtime = Monkey::new();
    /// match runtime.eval("5 + true") {
    ///     Ok(Value::Error(message)) => assert_eq!(message, "type mismatch: INTEGER + BOOLEAN"),
    ///     other => panic!("unexpected result: {:?}", other),
    /// }
    /// assert!(runtime.eval("let = 5").is_err());
    /// ```
    pub fn eval(&self, source: &str) -> RuntimeResult<Value> {
        let program = Self::parse(source)?;
        debug!(statements = program.statements.len(), "evaluating program");
        Ok(self.interpreter.eval_program(&program, &self.env))
    }

    /// Parse source code without evaluating it
    ///
    /// Diagnostics carry line, column and snippet resolved against `source`.
    pub fn parse(source: &str) -> RuntimeResult<Program> {
        let mut parser = Parser::new(Lexer::new(source));
        let (program, diagnostics) = parser.parse();

        if diagnostics.is_empty() {
            Ok(program)
        } else {
            Err(diagnostics
                .into_iter()
                .map(|diag| diag.with_source(source))
                .collect())
        }
    }

    /// The global scope
    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl Default for Monkey {
    fn default() -> Self {
        Self::new()
    }
}
