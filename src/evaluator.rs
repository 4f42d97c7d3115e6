//! Tree-walking evaluator for Monkey
//!
//! Evaluation never fails at the host level. Runtime errors are
//! `Value::Error` values: every composite rule checks each sub-result and
//! hands the first error straight back up. `return` travels the same way as
//! a `Value::ReturnValue` signal until a call boundary (or the program top
//! level) unwraps it.

use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, InfixOp, PrefixOp, Program, Statement};
use crate::builtins;
use crate::environment::{Env, Environment};
use crate::value::{Function, HashPair, HashTable, Value};

/// Return early with the value if it is an error, otherwise yield it
macro_rules! propagate {
    ($value:expr) => {
        match $value {
            err @ Value::Error(_) => return err,
            value => value,
        }
    };
}

/// Evaluate a whole program. A top-level `return` is unwrapped so the
/// signal never escapes to the caller.
pub fn eval_program(program: &Program, env: &Env) -> Value {
    let mut result = Value::NULL;

    for stmt in &program.statements {
        result = match eval_statement(stmt, env) {
            Value::ReturnValue(value) => return *value,
            err @ Value::Error(_) => return err,
            value => value,
        };
    }

    result
}

/// Evaluate a block. Return signals stay wrapped so they can escape nested
/// blocks up to the enclosing call.
fn eval_block(block: &BlockStatement, env: &Env) -> Value {
    let mut result = Value::NULL;

    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }

    result
}

pub fn eval_statement(stmt: &Statement, env: &Env) -> Value {
    match stmt {
        Statement::Let { name, value, .. } => {
            let value = propagate!(eval_expression(value, env));
            env.borrow_mut().define(name.value.clone(), value);
            Value::NULL
        }
        Statement::Return { value, .. } => {
            let value = propagate!(eval_expression(value, env));
            Value::ReturnValue(Box::new(value))
        }
        Statement::Expression { expression, .. } => eval_expression(expression, env),
        Statement::Block(block) => eval_block(block, env),
    }
}

pub fn eval_expression(expr: &Expression, env: &Env) -> Value {
    match expr {
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Integer { value, .. } => Value::Integer(*value),
        Expression::String { value, .. } => Value::String(value.clone()),
        Expression::Boolean { value, .. } => Value::from_bool(*value),

        Expression::Prefix { operator, right, .. } => {
            let right = propagate!(eval_expression(right, env));
            eval_prefix(*operator, right)
        }

        Expression::Infix { left, operator, right, .. } => {
            let left = propagate!(eval_expression(left, env));
            let right = propagate!(eval_expression(right, env));
            eval_infix(*operator, left, right)
        }

        Expression::If { condition, consequence, alternative, .. } => {
            let condition = propagate!(eval_expression(condition, env));
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Value::NULL
            }
        }

        Expression::Function { parameters, body, .. } => Value::Function(Rc::new(Function {
            parameters: Rc::clone(parameters),
            body: Rc::clone(body),
            env: Rc::clone(env),
        })),

        Expression::Call { function, arguments, .. } => {
            let function = propagate!(eval_expression(function, env));
            match eval_expressions(arguments, env) {
                Ok(args) => apply_function(function, args),
                Err(err) => err,
            }
        }

        Expression::Array { elements, .. } => match eval_expressions(elements, env) {
            Ok(elements) => Value::Array(Rc::new(elements)),
            Err(err) => err,
        },

        Expression::Index { left, index, .. } => {
            let left = propagate!(eval_expression(left, env));
            let index = propagate!(eval_expression(index, env));
            eval_index(left, index)
        }

        Expression::Hash { pairs, .. } => eval_hash_literal(pairs, env),
    }
}

fn eval_identifier(name: &str, env: &Env) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    match builtins::lookup(name) {
        Some(builtin) => Value::Builtin(builtin),
        None => Value::error(format!("identifier not found: {}", name)),
    }
}

/// Evaluate left to right, stopping at the first error
fn eval_expressions(exprs: &[Expression], env: &Env) -> Result<Vec<Value>, Value> {
    exprs
        .iter()
        .map(|expr| match eval_expression(expr, env) {
            err @ Value::Error(_) => Err(err),
            value => Ok(value),
        })
        .collect()
}

fn eval_prefix(operator: PrefixOp, right: Value) -> Value {
    match (operator, &right) {
        (PrefixOp::Not, _) => Value::from_bool(!right.is_truthy()),
        (PrefixOp::Neg, Value::Integer(n)) => Value::Integer(n.wrapping_neg()),
        (PrefixOp::Neg, _) => {
            Value::error(format!("unknown operator: {}{}", operator, right.type_name()))
        }
    }
}

fn eval_infix(operator: InfixOp, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) if operator == InfixOp::Add => {
            Value::String(format!("{}{}", l, r))
        }
        _ if left.type_name() != right.type_name() => Value::error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        (Value::String(_), Value::String(_)) => unknown_infix(operator, &left, &right),
        _ => match operator {
            InfixOp::Eq => Value::from_bool(left.is_identical(&right)),
            InfixOp::NotEq => Value::from_bool(!left.is_identical(&right)),
            _ => unknown_infix(operator, &left, &right),
        },
    }
}

fn eval_integer_infix(operator: InfixOp, left: i64, right: i64) -> Value {
    match operator {
        InfixOp::Add => Value::Integer(left.wrapping_add(right)),
        InfixOp::Sub => Value::Integer(left.wrapping_sub(right)),
        InfixOp::Mul => Value::Integer(left.wrapping_mul(right)),
        InfixOp::Div if right == 0 => Value::error("division by zero"),
        InfixOp::Div => Value::Integer(left.wrapping_div(right)),
        InfixOp::Lt => Value::from_bool(left < right),
        InfixOp::Gt => Value::from_bool(left > right),
        InfixOp::Eq => Value::from_bool(left == right),
        InfixOp::NotEq => Value::from_bool(left != right),
    }
}

fn unknown_infix(operator: InfixOp, left: &Value, right: &Value) -> Value {
    Value::error(format!(
        "unknown operator: {} {} {}",
        left.type_name(),
        operator,
        right.type_name()
    ))
}

fn apply_function(function: Value, args: Vec<Value>) -> Value {
    match function {
        Value::Function(function) => {
            let env = Environment::with_parent(Rc::clone(&function.env));
            {
                let mut frame = env.borrow_mut();
                // arity is not checked: extra arguments are dropped and
                // missing parameters stay unbound
                for (param, arg) in function.parameters.iter().zip(args) {
                    frame.define(param.value.clone(), arg);
                }
            }
            match eval_block(&function.body, &env) {
                Value::ReturnValue(value) => *value,
                value => value,
            }
        }
        Value::Builtin(builtin) => builtin.call(&args),
        other => Value::error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_index(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Value::NULL),
        (Value::Hash(hash), _) => match index.hash_key() {
            Some(key) => hash
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::NULL),
            None => Value::error(format!("unusable as hash key: {}", index.type_name())),
        },
        _ => Value::error(format!("index operator not supported: {}", left.type_name())),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Value {
    let mut table = HashTable::new();

    for (key_expr, value_expr) in pairs {
        let key = propagate!(eval_expression(key_expr, env));
        let Some(hash_key) = key.hash_key() else {
            return Value::error(format!("unusable as hash key: {}", key.type_name()));
        };
        let value = propagate!(eval_expression(value_expr, env));
        table.insert(hash_key, HashPair { key, value });
    }

    Value::Hash(Rc::new(table))
}
