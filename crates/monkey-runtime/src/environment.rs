//! Variable scopes
//!
//! Scopes form a chain from the innermost call frame out to the global scope.
//! Closures hold a shared handle to the scope they were created in, so a scope
//! lives as long as any function or running call still refers to it.

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Shared handle to a scope
pub type Env = Rc<RefCell<Environment>>;

/// A single scope of `let` bindings
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    /// Create a root scope
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Create an empty scope nested inside `outer`
    pub fn new_enclosed(outer: &Env) -> Env {
        trace!("entering enclosed scope");
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Look `name` up in this scope, then in each enclosing scope
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Bind `name` in this scope, replacing any existing local binding
    ///
    /// Enclosing scopes are never written to.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Names bound directly in this scope, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.store.keys().cloned().collect();
        names.sort();
        names
    }
}
