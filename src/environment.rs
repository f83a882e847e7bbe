use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope frame.  Frames are shared by every closure created while they
/// were live, so they are handed around as `Rc<RefCell<Environment>>`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Shorthand for a fresh shared child frame of `enclosing`.
    pub fn child_of(enclosing: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::with_enclosing(enclosing.clone())))
    }

    /// Bind `name` in this frame, silently replacing an existing binding.
    pub fn define(&mut self, name: &str, value: Value) {
        trace!("define '{}'", name);
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up here, then outward.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(LoxError::runtime(
                name,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(LoxError::runtime(
                name,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// The frame `distance` hops outward from `env`.
    ///
    /// # Panics
    ///
    /// If the chain is shorter than `distance`, which means the resolver and
    /// the interpreter disagree about scope shapes.
    pub fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut frame: Rc<RefCell<Environment>> = env.clone();

        for hop in 0..distance {
            let next = frame.borrow().enclosing.clone();
            frame = match next {
                Some(enclosing) => enclosing,
                None => panic!(
                    "scope chain ended after {} of {} frames; resolver and interpreter disagree",
                    hop, distance
                ),
            };
        }

        frame
    }

    /// Read a resolver‑annotated binding exactly `distance` frames out.
    ///
    /// # Panics
    ///
    /// If the binding is missing from that frame (see [`Environment::ancestor`]).
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Value {
        let frame = Environment::ancestor(env, distance);
        let value = frame.borrow().values.get(name).cloned();

        match value {
            Some(value) => value,
            None => panic!(
                "'{}' not bound at distance {}; resolver and interpreter disagree",
                name, distance
            ),
        }
    }

    /// Write a resolver‑annotated binding exactly `distance` frames out.
    pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token, value: Value) {
        Environment::ancestor(env, distance)
            .borrow_mut()
            .values
            .insert(name.lexeme.clone(), value);
    }
}
