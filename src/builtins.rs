//! Built-in functions
//!
//! Consulted by identifier lookup only after the environment chain misses.
//! Each builtin validates its own arity and argument types.

use std::rc::Rc;

use crate::value::{Builtin, BuiltinFn, Value};

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", len as BuiltinFn),
    ("first", first as BuiltinFn),
    ("last", last as BuiltinFn),
    ("rest", rest as BuiltinFn),
    ("push", push as BuiltinFn),
    ("puts", puts as BuiltinFn),
];

/// Look up a builtin by name
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|&(name, func)| Builtin::new(name, func))
}

fn check_arity(args: &[Value], want: usize) -> Option<Value> {
    (args.len() != want).then(|| {
        Value::error(format!(
            "wrong number of arguments, got={}, want={}",
            args.len(),
            want
        ))
    })
}

fn len(args: &[Value]) -> Value {
    if let Some(err) = check_arity(args, 1) {
        return err;
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.chars().count() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => Value::error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

/// Unwrap the single array argument of `name`, or produce its error value
fn array_arg<'v>(
    name: &str,
    args: &'v [Value],
    arity: usize,
) -> Result<&'v Rc<Vec<Value>>, Value> {
    if let Some(err) = check_arity(args, arity) {
        return Err(err);
    }
    match &args[0] {
        Value::Array(elements) => Ok(elements),
        other => Err(Value::error(format!(
            "argument to `{}` must be ARRAY, got {}",
            name,
            other.type_name()
        ))),
    }
}

fn first(args: &[Value]) -> Value {
    match array_arg("first", args, 1) {
        Ok(elements) => elements.first().cloned().unwrap_or(Value::NULL),
        Err(err) => err,
    }
}

fn last(args: &[Value]) -> Value {
    match array_arg("last", args, 1) {
        Ok(elements) => elements.last().cloned().unwrap_or(Value::NULL),
        Err(err) => err,
    }
}

fn rest(args: &[Value]) -> Value {
    match array_arg("rest", args, 1) {
        Ok(elements) if elements.is_empty() => Value::NULL,
        Ok(elements) => Value::Array(Rc::new(elements[1..].to_vec())),
        Err(err) => err,
    }
}

fn push(args: &[Value]) -> Value {
    match array_arg("push", args, 2) {
        Ok(elements) => {
            let mut pushed = Vec::with_capacity(elements.len() + 1);
            pushed.extend(elements.iter().cloned());
            pushed.push(args[1].clone());
            Value::Array(Rc::new(pushed))
        }
        Err(err) => err,
    }
}

fn puts(args: &[Value]) -> Value {
    for arg in args {
        println!("{}", arg);
    }
    Value::NULL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> Value {
        lookup(name).expect("builtin").call(args)
    }

    fn array(values: &[i64]) -> Value {
        Value::Array(Rc::new(values.iter().map(|&n| Value::Integer(n)).collect()))
    }

    #[test]
    fn test_registry() {
        for name in ["len", "first", "last", "rest", "push", "puts"] {
            assert_eq!(lookup(name).map(|b| b.name), Some(name));
        }
        assert!(lookup("print").is_none());
    }

    #[test]
    fn test_len() {
        assert_eq!(call("len", &[Value::String("four".into())]), Value::Integer(4));
        assert_eq!(call("len", &[array(&[1, 2, 3])]), Value::Integer(3));
        assert_eq!(
            call("len", &[Value::Integer(1)]),
            Value::error("argument to `len` not supported, got INTEGER")
        );
        assert_eq!(
            call("len", &[Value::String("one".into()), Value::String("two".into())]),
            Value::error("wrong number of arguments, got=2, want=1")
        );
    }

    #[test]
    fn test_array_builtins() {
        assert_eq!(call("first", &[array(&[1, 2, 3])]), Value::Integer(1));
        assert_eq!(call("last", &[array(&[1, 2, 3])]), Value::Integer(3));
        assert_eq!(call("rest", &[array(&[1, 2, 3])]), array(&[2, 3]));
        assert_eq!(call("first", &[array(&[])]), Value::NULL);
        assert_eq!(call("rest", &[array(&[])]), Value::NULL);
        assert_eq!(
            call("first", &[Value::Integer(1)]),
            Value::error("argument to `first` must be ARRAY, got INTEGER")
        );
    }

    #[test]
    fn test_push_leaves_original_untouched() {
        let original = array(&[1]);
        assert_eq!(call("push", &[original.clone(), Value::Integer(2)]), array(&[1, 2]));
        assert_eq!(original, array(&[1]));
        assert_eq!(
            call("push", &[original]),
            Value::error("wrong number of arguments, got=1, want=2")
        );
    }
}
