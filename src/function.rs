use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::callable::LoxCallable;
use crate::class::LoxInstance;
use crate::environment::Environment;
use crate::error::Result;
use crate::interpreter::{Flow, Interpreter};
use crate::value::Value;

/// A user‑declared function, method or lambda together with the frame it
/// closes over.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(
        declaration: Rc<FunctionDecl>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.declaration.name.as_ref().map(|t| t.lexeme.as_str())
    }

    /// Same declaration, closing over a new frame that binds `this`.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        let environment = Environment::child_of(&self.closure);
        environment
            .borrow_mut()
            .define("this", Value::Instance(instance));

        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }
}

impl LoxCallable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.arity()
    }

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        debug!(
            "Calling function '{}' with {} arguments",
            self.name().unwrap_or("<anonymous>"),
            arguments.len()
        );

        let environment = Environment::child_of(&self.closure);

        {
            let mut frame = environment.borrow_mut();
            for (param, argument) in self.declaration.params.iter().zip(arguments) {
                frame.define(&param.lexeme, argument);
            }
        }

        let flow: Flow = interpreter.execute_block(&self.declaration.body, environment)?;

        // `init()` always hands back the instance, even after a bare `return;`.
        if self.is_initializer {
            return Ok(Environment::get_at(&self.closure, 0, "this"));
        }

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal | Flow::Break => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name())
            .field("arity", &self.declaration.arity())
            .field("is_initializer", &self.is_initializer)
            .finish()
    }
}
