//! Expression evaluation

use crate::ast::*;
use crate::environment::{Env, Environment};
use crate::interpreter::Interpreter;
use crate::value::{FunctionValue, HashPair, HashValue, RuntimeError, Value};
use std::rc::Rc;
use tracing::trace;

impl Interpreter {
    /// Evaluate an expression
    pub(super) fn eval_expression(
        &self,
        expr: &Expression,
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Integer(lit) => Ok(Value::Integer(lit.value)),
            Expression::String(lit) => Ok(Value::string(lit.value.as_str())),
            Expression::Boolean(lit) => Ok(Value::Boolean(lit.value)),
            Expression::Identifier(ident) => self.eval_identifier(ident, env),
            Expression::Prefix(prefix) => {
                let right = self.eval_expression(&prefix.right, env)?;
                eval_prefix(prefix.operator, &right)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left, env)?;
                let right = self.eval_expression(&infix.right, env)?;
                eval_infix(infix.operator, &left, &right)
            }
            Expression::If(if_expr) => self.eval_if(if_expr, env),
            Expression::Function(func) => Ok(Value::Function(Rc::new(FunctionValue {
                parameters: func.parameters.clone(),
                body: func.body.clone(),
                env: Rc::clone(env),
            }))),
            Expression::Call(call) => {
                let function = self.eval_expression(&call.function, env)?;
                let args = self.eval_expressions(&call.arguments, env)?;
                self.apply_function(&function, &args)
            }
            Expression::Array(array) => {
                let elements = self.eval_expressions(&array.elements, env)?;
                Ok(Value::array(elements))
            }
            Expression::Index(index_expr) => {
                let left = self.eval_expression(&index_expr.left, env)?;
                let index = self.eval_expression(&index_expr.index, env)?;
                eval_index(&left, &index)
            }
            Expression::Hash(hash) => self.eval_hash_literal(hash, env),
        }
    }

    /// Evaluate expressions left to right, stopping at the first error
    fn eval_expressions(
        &self,
        exprs: &[Expression],
        env: &Env,
    ) -> Result<Vec<Value>, RuntimeError> {
        exprs
            .iter()
            .map(|expr| self.eval_expression(expr, env))
            .collect()
    }

    /// Resolve a name through the scope chain, then the builtins
    fn eval_identifier(&self, ident: &Identifier, env: &Env) -> Result<Value, RuntimeError> {
        if let Some(value) = env.borrow().get(&ident.value) {
            return Ok(value);
        }

        self.builtins
            .get(&ident.value)
            .ok_or_else(|| RuntimeError::IdentifierNotFound {
                name: ident.value.clone(),
            })
    }

    fn eval_if(&self, if_expr: &IfExpression, env: &Env) -> Result<Value, RuntimeError> {
        let condition = self.eval_expression(&if_expr.condition, env)?;

        if condition.is_truthy() {
            self.eval_block(&if_expr.consequence, env)
        } else if let Some(alternative) = &if_expr.alternative {
            self.eval_block(alternative, env)
        } else {
            Ok(Value::Null)
        }
    }

    /// Call a function or builtin with already evaluated arguments
    ///
    /// The body runs in a fresh scope enclosed by the scope the function was
    /// defined in, not the caller's.
    pub(super) fn apply_function(
        &self,
        function: &Value,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        match function {
            Value::Function(func) => {
                if args.len() != func.parameters.len() {
                    return Err(RuntimeError::WrongArgumentCount {
                        got: args.len(),
                        expected: func.parameters.len(),
                    });
                }

                trace!(arity = args.len(), "applying function");
                let scope = Environment::new_enclosed(&func.env);
                {
                    let mut scope = scope.borrow_mut();
                    for (param, arg) in func.parameters.iter().zip(args) {
                        scope.set(param.value.clone(), arg.clone());
                    }
                }

                match self.eval_block(&func.body, &scope)? {
                    Value::ReturnValue(value) => Ok(*value),
                    value => Ok(value),
                }
            }
            Value::Builtin(builtin) => {
                trace!(name = builtin.name, "applying builtin");
                (builtin.func)(args)
            }
            other => Err(RuntimeError::NotAFunction(other.object_type())),
        }
    }

    fn eval_hash_literal(&self, lit: &HashLiteral, env: &Env) -> Result<Value, RuntimeError> {
        let mut hash = HashValue::new();

        for (key_expr, value_expr) in &lit.pairs {
            let key = self.eval_expression(key_expr, env)?;
            let hash_key = key.hash_key()?;
            let value = self.eval_expression(value_expr, env)?;
            hash.insert(hash_key, HashPair { key, value });
        }

        Ok(Value::Hash(Rc::new(hash)))
    }
}

fn eval_prefix(operator: PrefixOperator, right: &Value) -> Result<Value, RuntimeError> {
    match (operator, right) {
        (PrefixOperator::Bang, _) => Ok(Value::Boolean(!right.is_truthy())),
        (PrefixOperator::Minus, Value::Integer(n)) => Ok(Value::Integer(n.wrapping_neg())),
        (PrefixOperator::Minus, _) => Err(RuntimeError::UnknownPrefixOperator {
            operator,
            operand: right.object_type(),
        }),
    }
}

fn eval_infix(operator: InfixOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => match operator {
            InfixOperator::Plus => Ok(Value::string(format!("{}{}", l, r))),
            InfixOperator::Eq => Ok(Value::Boolean(l == r)),
            InfixOperator::NotEq => Ok(Value::Boolean(l != r)),
            _ => Err(unknown_operator(operator, left, right)),
        },
        _ => match operator {
            InfixOperator::Eq => Ok(Value::Boolean(same_object(left, right))),
            InfixOperator::NotEq => Ok(Value::Boolean(!same_object(left, right))),
            _ if left.object_type() != right.object_type() => Err(RuntimeError::TypeMismatch {
                left: left.object_type(),
                operator,
                right: right.object_type(),
            }),
            _ => Err(unknown_operator(operator, left, right)),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, l: i64, r: i64) -> Result<Value, RuntimeError> {
    let value = match operator {
        InfixOperator::Plus => Value::Integer(l.wrapping_add(r)),
        InfixOperator::Minus => Value::Integer(l.wrapping_sub(r)),
        InfixOperator::Asterisk => Value::Integer(l.wrapping_mul(r)),
        InfixOperator::Slash => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Integer(l.wrapping_div(r))
        }
        InfixOperator::Lt => Value::Boolean(l < r),
        InfixOperator::Gt => Value::Boolean(l > r),
        InfixOperator::Eq => Value::Boolean(l == r),
        InfixOperator::NotEq => Value::Boolean(l != r),
    };
    Ok(value)
}

/// `==` for values other than two integers or two strings
///
/// Booleans and null compare by value; arrays, hashes and functions are only
/// equal to themselves.
fn same_object(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        (Value::Array(l), Value::Array(r)) => Rc::ptr_eq(l, r),
        (Value::Hash(l), Value::Hash(r)) => Rc::ptr_eq(l, r),
        (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
        (Value::Builtin(l), Value::Builtin(r)) => l.name == r.name,
        _ => false,
    }
}

fn unknown_operator(operator: InfixOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnknownInfixOperator {
        left: left.object_type(),
        operator,
        right: right.object_type(),
    }
}

fn eval_index(left: &Value, index: &Value) -> Result<Value, RuntimeError> {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Value::Null)),
        (Value::Hash(hash), _) => {
            let key = index.hash_key()?;
            Ok(hash
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null))
        }
        _ => Err(RuntimeError::IndexNotSupported(left.object_type())),
    }
}
