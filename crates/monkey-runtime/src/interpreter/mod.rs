//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation against a chain of [`Environment`] scopes.
//! Supports:
//! - Integer, boolean and string arithmetic/comparison
//! - `let` bindings, `return`, and `if`/`else`
//! - First-class functions and closures
//! - Arrays, hashes and indexing
//! - Builtin functions
//!
//! Internally every step returns `Result<Value, RuntimeError>` and the first
//! error aborts evaluation through `?`. At the entry points the error becomes
//! a [`Value::Error`], so callers always receive a value.
//!
//! [`Environment`]: crate::environment::Environment

mod expr;
mod stmt;

use crate::ast::{BlockStatement, Node, Program};
use crate::environment::Env;
use crate::stdlib::Builtins;
use crate::value::{RuntimeError, Value};
use tracing::{debug, instrument};

/// Interpreter state
pub struct Interpreter {
    /// Builtins consulted after the environment chain
    pub(super) builtins: Builtins,
}

impl Interpreter {
    /// Create a new interpreter with the standard builtins
    pub fn new() -> Self {
        Self::with_builtins(Builtins::standard())
    }

    pub fn with_builtins(builtins: Builtins) -> Self {
        Self { builtins }
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Evaluate any AST node in `env`
    ///
    /// A `return` outside of a program or function body yields a
    /// [`Value::ReturnValue`]; evaluating a whole [`Program`] unwraps it.
    pub fn eval<'a>(&self, node: impl Into<Node<'a>>, env: &Env) -> Value {
        let result = match node.into() {
            Node::Program(program) => return self.eval_program(program, env),
            Node::Statement(stmt) => self.eval_statement(stmt, env),
            Node::Block(block) => self.eval_block(block, env),
            Node::Expression(expr) => self.eval_expression(expr, env),
        };

        result.unwrap_or_else(Value::from)
    }

    /// Evaluate a program, returning the value of its last statement
    ///
    /// Stops at the first `return` (yielding its value) or error (yielding a
    /// [`Value::Error`]). An empty program evaluates to null.
    #[instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn eval_program(&self, program: &Program, env: &Env) -> Value {
        let mut result = Value::Null;

        for stmt in &program.statements {
            match self.eval_statement(stmt, env) {
                Ok(Value::ReturnValue(value)) => return *value,
                Ok(value) => result = value,
                Err(err) => {
                    debug!(error = %err, "evaluation failed");
                    return Value::from(err);
                }
            }
        }

        result
    }

    /// Evaluate statements in order, stopping at a `return`
    ///
    /// The return value stays wrapped so it can unwind through enclosing
    /// blocks up to the function call or program.
    pub(super) fn eval_block(
        &self,
        block: &BlockStatement,
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        let mut result = Value::Null;

        for stmt in &block.statements {
            result = self.eval_statement(stmt, env)?;
            if matches!(result, Value::ReturnValue(_)) {
                return Ok(result);
            }
        }

        Ok(result)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::environment::Environment;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(source: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        program
    }

    fn eval(source: &str) -> Value {
        Interpreter::new().eval(&parse(source), &Environment::new())
    }

    #[test]
    fn test_interpreter_creation() {
        let interpreter = Interpreter::new();
        assert!(interpreter.builtins().is_builtin("len"));
    }

    #[test]
    fn test_empty_program_is_null() {
        assert_eq!(eval(""), Value::Null);
    }

    #[test]
    fn test_program_value_is_last_statement() {
        assert_eq!(eval("1; 2; 3"), Value::Integer(3));
        assert_eq!(eval("let x = 1;"), Value::Null);
    }

    #[test]
    fn test_program_unwraps_return() {
        assert_eq!(eval("9; return 2 * 5; 9;"), Value::Integer(10));
    }

    #[test]
    fn test_statement_keeps_return_wrapped() {
        let program = parse("return 1;");
        let stmt: &Statement = &program.statements[0];
        let value = Interpreter::new().eval(stmt, &Environment::new());
        assert_eq!(value, Value::ReturnValue(Box::new(Value::Integer(1))));
    }

    #[test]
    fn test_error_stops_program() {
        let env = Environment::new();
        let value = Interpreter::new().eval(&parse("let a = 1; a + true; let b = 2;"), &env);
        assert_eq!(
            value,
            Value::Error("type mismatch: INTEGER + BOOLEAN".to_string())
        );
        assert_eq!(env.borrow().get("b"), None);
    }

    #[test]
    fn test_expression_node() {
        let program = parse("1 + 2");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let value = Interpreter::new().eval(&stmt.expression, &Environment::new());
        assert_eq!(value, Value::Integer(3));
    }
}
