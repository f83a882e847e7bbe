//! Tree‑walking evaluator.
//!
//! Statements execute to a [`Flow`]: `return` and `break` travel back up the
//! Rust call stack as ordinary values and are consumed by the nearest function
//! call or loop.  Only genuine runtime failures use the `Err` channel, and the
//! first one aborts the whole [`Interpreter::interpret`] batch.
//!
//! Recursion depth is bounded by the host stack.  A script that recurses
//! without end overflows it, which is fatal to the process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::callable::{self, NativeFunction};
use crate::class::{LoxClass, LoxInstance};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::function::LoxFunction;
use crate::resolver::Locals;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Return(Value),
    Break,
}

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    out: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to stdout, with native functions such as `clock`
    /// defined in the global scope.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Interpreter whose `print` statements write to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        debug!("Defining native function 'clock'");

        globals.borrow_mut().define(
            "clock",
            Value::NativeFunction(Rc::new(NativeFunction::new("clock", 0, callable::clock))),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Merge a resolver side‑table.  Entries from earlier runs stay valid.
    pub fn resolve(&mut self, locals: Locals) {
        debug!("Recording {} resolved locals", locals.len());
        self.locals.extend(locals);
    }

    /// Execute a program.  Stops at the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            self.execute(stmt)?;
        }

        self.out.flush()?;

        info!("Interpretation completed successfully");

        Ok(())
    }

    /// Run `statements` in `environment`, restoring the current frame
    /// afterwards on every path, including errors.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Flow> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = self.execute_all(statements);

        self.environment = previous;

        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            match self.execute(stmt)? {
                Flow::Normal => {}
                transfer => return Ok(transfer),
            }
        }

        Ok(Flow::Normal)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}'", name.lexeme);
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let frame = Environment::child_of(&self.environment);
                self.execute_block(statements, frame)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_stmt) = else_branch {
                    self.execute(else_stmt)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Flow::Normal => {}
                        Flow::Break => break,
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Break(_) => Ok(Flow::Break),

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }

            Stmt::Function(declaration) => {
                let name: &str = declaration.name.as_ref().map_or("", |t| t.lexeme.as_str());
                debug!("Defining function '{}'", name);

                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment
                    .borrow_mut()
                    .define(name, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                self.execute_class(name, superclass.as_ref(), methods)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<crate::ast::FunctionDecl>],
    ) -> Result<()> {
        debug!("Declaring class '{}'", name.lexeme);

        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let token: &Token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(LoxError::runtime(token, "Superclass must be a class."));
                }
            },
            None => None,
        };

        // Methods close over a frame binding `super`, mirroring the resolver.
        let enclosing = Rc::clone(&self.environment);
        if let Some(superclass) = &superclass {
            self.environment = Environment::child_of(&enclosing);
            self.environment
                .borrow_mut()
                .define("super", Value::Class(Rc::clone(superclass)));
        }

        let mut table: HashMap<String, Rc<LoxFunction>> = HashMap::new();
        for method in methods {
            let method_name: &str = method.name.as_ref().map_or("", |t| t.lexeme.as_str());
            let function = LoxFunction::new(
                Rc::clone(method),
                Rc::clone(&self.environment),
                method_name == "init",
            );
            table.insert(method_name.to_string(), Rc::new(function));
        }

        let class = LoxClass::new(name.lexeme.clone(), superclass, table);

        self.environment = enclosing;
        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))?;

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::from(s.as_str()),
                LiteralValue::Bool(b) => Value::Bool(*b),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left_val = self.evaluate(left)?;
                let short_circuits = if operator.token_type == TokenType::OR {
                    left_val.is_truthy()
                } else {
                    !left_val.is_truthy()
                };

                if short_circuits {
                    Ok(left_val)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee_val = self.evaluate(callee)?;

                let mut arg_values = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    arg_values.push(self.evaluate(arg)?);
                }

                self.call_value(callee_val, paren, arg_values)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),
                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let instance = match self.evaluate(object)? {
                    Value::Instance(instance) => instance,
                    _ => return Err(LoxError::runtime(name, "Only instances have fields.")),
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());

                Ok(value)
            }

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),

            Expr::AnonymousFunction(declaration) => Ok(Value::Function(Rc::new(
                LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment), false),
            ))),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Ok(Environment::get_at(
                &self.environment,
                distance,
                &name.lexeme,
            )),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = match self.locals.get(&id) {
            Some(&distance) => distance,
            None => {
                return Err(LoxError::runtime(
                    keyword,
                    "Can't use 'super' outside of a class.",
                ))
            }
        };

        // `this` lives in the frame just inside the one holding `super`.
        let superclass = Environment::get_at(&self.environment, distance, "super");
        let object = Environment::get_at(&self.environment, distance - 1, "this");

        let (Value::Class(superclass), Value::Instance(object)) = (superclass, object) else {
            return Err(LoxError::runtime(keyword, "Invalid 'super' binding."));
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(object)))),
            None => Err(LoxError::runtime(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }

    fn call_value(&mut self, callee: Value, paren: &Token, arguments: Vec<Value>) -> Result<Value> {
        let Some(callable) = callee.as_callable() else {
            return Err(LoxError::runtime(
                paren,
                "Can only call functions and classes.",
            ));
        };

        if arguments.len() != callable.arity() {
            return Err(LoxError::runtime(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
            ));
        }

        debug!("Calling {} with {} arguments", callee, arguments.len());

        callable.call(self, arguments)
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let right_val = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right_val {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },
            TokenType::BANG => Ok(Value::Bool(!right_val.is_truthy())),
            _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left_val = self.evaluate(left)?;
        let right_val = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (&left_val, &right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => {
                    let mut joined = String::with_capacity(a.len() + b.len());
                    joined.push_str(a);
                    joined.push_str(b);
                    Ok(Value::from(joined.as_str()))
                }
                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left_val.is_equal(&right_val))),
            TokenType::BANG_EQUAL => Ok(Value::Bool(!left_val.is_equal(&right_val))),

            _ => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;

                match operator.token_type {
                    TokenType::MINUS => Ok(Value::Number(a - b)),
                    TokenType::STAR => Ok(Value::Number(a * b)),
                    // IEEE‑754: x/0 is ±inf or NaN, not an error.
                    TokenType::SLASH => Ok(Value::Number(a / b)),
                    TokenType::GREATER => Ok(Value::Bool(a > b)),
                    TokenType::GREATER_EQUAL => Ok(Value::Bool(a >= b)),
                    TokenType::LESS => Ok(Value::Bool(a < b)),
                    TokenType::LESS_EQUAL => Ok(Value::Bool(a <= b)),
                    _ => Err(LoxError::runtime(operator, "Invalid binary operator.")),
                }
            }
        }
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
    }
}
