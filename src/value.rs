use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::callable::{LoxCallable, NativeFunction};
use crate::class::{LoxClass, LoxInstance};
use crate::function::LoxFunction;

/// A runtime value.  Strings are immutable and shared; callables and
/// instances have reference identity.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Function(Rc<LoxFunction>),
    NativeFunction(Rc<NativeFunction>),
    Class(Rc<LoxClass>),
    Instance(Rc<RefCell<LoxInstance>>),
}

impl Value {
    /// `nil` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    /// Language equality.  Never fails; values of different types are unequal.
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The callable behind this value, if it can be invoked.
    pub fn as_callable(&self) -> Option<Rc<dyn LoxCallable>> {
        match self {
            Value::Function(f) => Some(f.clone()),
            Value::NativeFunction(n) => Some(n.clone()),
            Value::Class(c) => Some(c.clone()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => f.write_str(&format_number(*n)),

            Value::String(s) => write!(f, "{}", s),

            Value::Function(func) => match func.name() {
                Some(name) => write!(f, "<fn {}>", name),
                None => write!(f, "<fn>"),
            },

            Value::NativeFunction(_) => write!(f, "<native fn>"),

            Value::Class(class) => write!(f, "{}", class.name),

            Value::Instance(instance) => write!(f, "{} instance", instance.borrow().class_name()),
        }
    }
}

/// Shortest round‑trip digits.  Decimal exponents outside `-4..16` switch to
/// scientific notation (`1e+16`, `2.5e-07`); a whole number drops its `.0`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific: String = format!("{:e}", n);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        if n.fract() == 0.0 {
            format!("{:.0}", n)
        } else {
            n.to_string()
        }
    } else {
        let sign: char = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
