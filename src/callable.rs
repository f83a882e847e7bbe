use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Anything a call expression can invoke.
///
/// Arity is checked by the interpreter before `call`; implementations may
/// assume `arguments.len() == self.arity()`.
pub trait LoxCallable {
    fn arity(&self) -> usize;

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value>;
}

/// A host function exposed to scripts.
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: fn(&[Value]) -> Value,
}

impl NativeFunction {
    pub fn new(name: &str, arity: usize, func: fn(&[Value]) -> Value) -> Self {
        Self {
            name: name.to_string(),
            arity,
            func,
        }
    }
}

impl LoxCallable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(self: Rc<Self>, _interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        Ok((self.func)(&arguments))
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// `clock()`: seconds since the Unix epoch, with sub‑second precision.
pub fn clock(_arguments: &[Value]) -> Value {
    let micros: i64 = chrono::Utc::now().timestamp_micros();

    Value::Number(micros as f64 / 1_000_000.0)
}
