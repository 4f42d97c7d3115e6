//! Variable environment for Monkey
//!
//! Scopes form a chain from the innermost frame outward. Functions hold a
//! shared handle to the frame they were defined in, which keeps it alive
//! after the defining call returns.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// Shared handle to a scope
pub type Env = Rc<RefCell<Environment>>;

/// Variable environment with lexical scoping
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<Env>,
}

impl Environment {
    /// Create a new global environment
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Create a child environment with parent scope
    pub fn with_parent(parent: Env) -> Env {
        Rc::new(RefCell::new(Self {
            values: HashMap::new(),
            parent: Some(parent),
        }))
    }

    /// Bind a name in this frame, shadowing any outer binding
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Look a name up through the scope chain
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.borrow().get(name)),
        }
    }
}
