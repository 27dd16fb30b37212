//! REPL core logic (UI-agnostic)

use crate::ast::Statement;
use crate::diagnostic::Diagnostic;
use crate::environment::{Env, Environment};
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::runtime::Monkey;
use crate::token::Token;
use crate::value::Value;
use tracing::debug;

/// REPL result type
#[derive(Debug)]
pub struct ReplResult {
    /// The value to echo back (None for a successful trailing `let`, empty input or parse errors)
    pub value: Option<Value>,
    /// Parse diagnostics; non-empty means nothing was evaluated
    pub diagnostics: Vec<Diagnostic>,
}

/// REPL core state
///
/// Maintains persistent state across multiple eval calls:
/// - `let` bindings persist
/// - Errors do not reset state
pub struct ReplCore {
    interpreter: Interpreter,
    env: Env,
}

impl ReplCore {
    /// Create a new REPL core
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            env: Environment::new(),
        }
    }

    /// Evaluate a line of input
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let program = match Monkey::parse(input) {
            Ok(program) => program,
            Err(diagnostics) => {
                return ReplResult {
                    value: None,
                    diagnostics,
                }
            }
        };

        let value = self.interpreter.eval_program(&program, &self.env);
        debug!(result = %value.type_name(), "repl line evaluated");

        let echo = match program.statements.last() {
            _ if value.is_error() => Some(value),
            None | Some(Statement::Let(_)) => None,
            Some(_) => Some(value),
        };

        ReplResult {
            value: echo,
            diagnostics: Vec::new(),
        }
    }

    /// Tokens of `input`, ending with `Eof`
    pub fn tokens(&self, input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    /// Global bindings, sorted by name
    pub fn variables(&self) -> Vec<(String, Value)> {
        let env = self.env.borrow();
        env.names()
            .into_iter()
            .filter_map(|name| env.get(&name).map(|value| (name, value)))
            .collect()
    }

    /// Names of the builtin functions
    pub fn builtin_names(&self) -> Vec<&'static str> {
        self.interpreter.builtins().names()
    }

    /// Drop all bindings
    pub fn reset(&mut self) {
        self.env = Environment::new();
    }
}

impl Default for ReplCore {
    fn default() -> Self {
        Self::new()
    }
}
