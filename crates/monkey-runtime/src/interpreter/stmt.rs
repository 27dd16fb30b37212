//! Statement evaluation

use crate::ast::Statement;
use crate::environment::Env;
use crate::interpreter::Interpreter;
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Evaluate a single statement
    pub(super) fn eval_statement(&self, stmt: &Statement, env: &Env) -> Result<Value, RuntimeError> {
        match stmt {
            Statement::Let(let_stmt) => {
                let value = self.eval_expression(&let_stmt.value, env)?;
                env.borrow_mut().set(let_stmt.name.value.clone(), value);
                Ok(Value::Null)
            }
            Statement::Return(ret) => {
                let value = self.eval_expression(&ret.value, env)?;
                Ok(Value::ReturnValue(Box::new(value)))
            }
            Statement::Expression(expr_stmt) => self.eval_expression(&expr_stmt.expression, env),
        }
    }
}
