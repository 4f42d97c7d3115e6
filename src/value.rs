//! Runtime value types for Monkey

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Env;
use crate::hash::{HashKey, HashKeyKind};

/// Runtime values in Monkey
#[derive(Clone)]
pub enum Value {
    Integer(i64),

    Boolean(bool),

    /// The absence of a value
    Null,

    String(String),

    Array(Rc<Vec<Value>>),

    Hash(Rc<HashTable>),

    /// User-defined function closing over its defining environment
    Function(Rc<Function>),

    /// Built-in function
    Builtin(Builtin),

    /// Signal carrying a `return`ed value up to the nearest call boundary
    ReturnValue(Box<Value>),

    /// Runtime error; propagates like a value until the top level
    Error(String),
}

impl Value {
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);
    pub const NULL: Value = Value::Null;

    pub fn from_bool(b: bool) -> Value {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    pub fn error(message: impl Into<String>) -> Value {
        Value::Error(message.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOL",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    /// Everything except `false` and `null` is truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Hash key for the hashable variants (integer, boolean, string)
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey::new(HashKeyKind::Integer, &n.to_string())),
            Value::Boolean(b) => Some(HashKey::new(HashKeyKind::Bool, &b.to_string())),
            Value::String(s) => Some(HashKey::new(HashKeyKind::String, s)),
            _ => None,
        }
    }

    /// Identity comparison used by `==`/`!=` outside integers and strings.
    /// Booleans and null are singletons, so comparing their values is the
    /// same as comparing identities; heap values compare by pointer.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Hash(hash) => write!(f, "{}", hash),
            Value::Function(func) => write!(f, "{}", func),
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::ReturnValue(value) => write!(f, "{}", value),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            _ => write!(f, "{}", self),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => self.is_identical(other),
        }
    }
}

/// A key/value entry stored in a hash; the original key is kept for display
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Hash contents in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashTable {
    pairs: Vec<HashPair>,
    index: HashMap<HashKey, usize>,
}

impl HashTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair; an equal key replaces the earlier pair in place
    pub fn insert(&mut self, hash_key: HashKey, pair: HashPair) {
        match self.index.get(&hash_key) {
            Some(&i) => self.pairs[i] = pair,
            None => {
                self.index.insert(hash_key, self.pairs.len());
                self.pairs.push(pair);
            }
        }
    }

    pub fn get(&self, hash_key: &HashKey) -> Option<&HashPair> {
        self.index.get(hash_key).map(|&i| &self.pairs[i])
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &HashPair> {
        self.pairs.iter()
    }
}

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// User-defined function
pub struct Function {
    pub parameters: Rc<Vec<Identifier>>,
    pub body: Rc<BlockStatement>,
    pub env: Env,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.value.as_str()).collect();
        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

/// Native function type
pub type BuiltinFn = fn(&[Value]) -> Value;

/// Native/built-in function
#[derive(Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Self { name, func }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_hash_keys_collide() {
        let hello1 = Value::String("Hello World".to_string());
        let hello2 = Value::String("Hello World".to_string());
        let diff = Value::String("My name is johnny".to_string());

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_ne!(hello1.hash_key(), diff.hash_key());
    }

    #[test]
    fn test_hash_key_kinds_do_not_collide() {
        let one = Value::Integer(1);
        let text = Value::String("1".to_string());
        assert_ne!(one.hash_key(), text.hash_key());
    }

    #[test]
    fn test_unhashable() {
        assert!(Value::Null.hash_key().is_none());
        assert!(Value::Array(Rc::new(vec![])).hash_key().is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
        assert!(!Value::FALSE.is_truthy());
        assert!(!Value::NULL.is_truthy());
    }

    #[test]
    fn test_inspect() {
        let mut table = HashTable::new();
        let key = Value::String("a".to_string());
        table.insert(
            key.hash_key().unwrap(),
            HashPair { key, value: Value::Integer(1) },
        );
        let array = Value::Array(Rc::new(vec![Value::Integer(1), Value::TRUE, Value::NULL]));

        assert_eq!(array.to_string(), "[1, true, null]");
        assert_eq!(Value::Hash(Rc::new(table)).to_string(), "{a: 1}");
        assert_eq!(Value::error("boom").to_string(), "ERROR: boom");
    }

    #[test]
    fn test_hash_insert_replaces_in_place() {
        let mut table = HashTable::new();
        for (k, v) in [("a", 1), ("b", 2), ("a", 3)] {
            let key = Value::String(k.to_string());
            table.insert(key.hash_key().unwrap(), HashPair { key, value: Value::Integer(v) });
        }
        assert_eq!(table.len(), 2);
        assert_eq!(table.to_string(), "{a: 3, b: 2}");
    }
}
