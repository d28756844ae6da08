use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::Value;

/// A single scope in the environment chain.
///
/// A scope maps names to values and optionally references the scope
/// enclosing it. The enclosing reference is fixed at construction and never
/// reassigned; the global scope has no enclosing scope and lives for the
/// duration of program execution.
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a scope with no enclosing scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope enclosed by `enclosing`.
    #[must_use]
    pub fn with_enclosing(enclosing: Rc<RefCell<Self>>) -> Self {
        Self { values:    HashMap::new(),
               enclosing: Some(enclosing), }
    }

    /// Binds `name` to `value` in this scope.
    ///
    /// Always binds in the current scope regardless of prior bindings here
    /// or in enclosing scopes; re-declaration silently shadows.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks up `name` in this scope, then each enclosing scope in turn.
    ///
    /// # Returns
    /// The bound value, or `None` when no scope in the chain has the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }

        self.enclosing
            .as_ref()
            .and_then(|enclosing| enclosing.borrow().get(name))
    }

    /// Assigns `value` to an existing binding of `name`, searching this
    /// scope and then each enclosing scope in turn.
    ///
    /// Unlike [`define`](Self::define), assignment never creates a binding.
    ///
    /// # Returns
    /// `true` when a binding was found and updated, `false` when the chain
    /// was exhausted.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => false,
        }
    }
}
