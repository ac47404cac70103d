//! A linked chain of mutable name→value scopes.
//!
//! Each environment optionally shares its parent (`Rc`), because several
//! closures and child scopes may hang off the same enclosing scope at
//! once.  A closure captures the `Rc<RefCell<Environment>>` that was
//! current at its creation, which is what lets a returned inner function
//! keep seeing updates to its enclosing function's locals after that call
//! has returned.
//!
//! `get`/`assign` walk the parent chain by name; `get_at`/`assign_at` are
//! the O(hops) counterparts used when the resolver has already supplied a
//! hop count.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::token::Position;
use crate::value::Value;

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// A root scope with no parent (the globals).
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            parent: None,
        }))
    }

    /// A child scope sharing `parent`.
    pub fn with_parent(parent: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            parent: Some(parent),
        }))
    }

    /// Bind `name` in *this* scope.  Returns `false` if the name is
    /// already bound here; a name may be defined at most once per scope.
    #[must_use]
    pub fn define(&mut self, name: &str, value: Value) -> bool {
        if self.values.contains_key(name) {
            return false;
        }

        self.values.insert(name.to_string(), value);
        true
    }

    /// Look `name` up, walking the parent chain outward.
    pub fn get(&self, name: &str, position: Position) -> Result<Value, (Position, String)> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().get(name, position),
            None => Err((position, format!("Undefined variable '{}'", name))),
        }
    }

    /// Reassign the nearest existing binding of `name`, walking outward.
    pub fn assign(
        &mut self,
        name: &str,
        value: Value,
        position: Position,
    ) -> Result<(), (Position, String)> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value, position),
            None => Err((position, format!("Undefined variable '{}'", name))),
        }
    }

    /// The scope `hops` parent links away from `env`.  Valid resolver
    /// output always stays within the chain; a broken chain is an
    /// interpreter bug surfaced as `None`.
    pub fn ancestor(env: &EnvRef, hops: usize) -> Option<EnvRef> {
        let mut current = Rc::clone(env);

        for _ in 0..hops {
            let next = current.borrow().parent.clone()?;
            current = next;
        }

        Some(current)
    }

    /// Read `name` from exactly `hops` scopes up.
    pub fn get_at(
        env: &EnvRef,
        hops: usize,
        name: &str,
        position: Position,
    ) -> Result<Value, (Position, String)> {
        let scope = Environment::ancestor(env, hops)
            .ok_or_else(|| (position, format!("Unresolved scope for '{}'", name)))?;

        let value = scope.borrow().values.get(name).cloned();

        value.ok_or_else(|| (position, format!("Undefined variable '{}'", name)))
    }

    /// Write `name` exactly `hops` scopes up.
    pub fn assign_at(
        env: &EnvRef,
        hops: usize,
        name: &str,
        value: Value,
        position: Position,
    ) -> Result<(), (Position, String)> {
        let scope = Environment::ancestor(env, hops)
            .ok_or_else(|| (position, format!("Unresolved scope for '{}'", name)))?;

        let mut scope = scope.borrow_mut();

        match scope.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err((position, format!("Undefined variable '{}'", name))),
        }
    }
}
