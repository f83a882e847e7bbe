use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::LoxCallable;
use crate::error::{LoxError, Result};
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    /// Own methods first, then up the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        match self.methods.get(name) {
            Some(method) => Some(Rc::clone(method)),
            None => self
                .superclass
                .as_ref()
                .and_then(|superclass| superclass.find_method(name)),
        }
    }
}

impl LoxCallable for LoxClass {
    fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        debug!("Constructing instance of '{}'", self.name);

        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(&self))));

        if let Some(initializer) = self.find_method("init") {
            let bound = Rc::new(initializer.bind(Rc::clone(&instance)));
            bound.call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxClass")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| &s.name))
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class.name
    }

    /// Field first, then a method bound to `instance`.
    pub fn get(instance: &Rc<RefCell<LoxInstance>>, name: &Token) -> Result<Value> {
        let (field, class) = {
            let this = instance.borrow();
            (this.fields.get(&name.lexeme).cloned(), Rc::clone(&this.class))
        };

        if let Some(value) = field {
            return Ok(value);
        }

        match class.find_method(&name.lexeme) {
            Some(method) => Ok(Value::Function(Rc::new(method.bind(Rc::clone(instance))))),
            None => Err(LoxError::runtime(
                name,
                format!("Undefined property '{}'.", name.lexeme),
            )),
        }
    }

    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxInstance")
            .field("class", &self.class.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
