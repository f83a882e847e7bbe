//! Syntax tree produced by the parser and walked by the resolver and the
//! interpreter.
//!
//! Both families are closed sum types; every consumer matches them
//! exhaustively.  Function declarations are reference counted because a
//! closure created at runtime shares its body with the tree.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

/// Identity of an expression use‑site that the resolver annotates
/// (`Variable`, `Assign`, `This`, `Super`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExprId(pub usize);

static NEXT_EXPR_ID: AtomicUsize = AtomicUsize::new(0);

impl ExprId {
    /// Allocate an id unique for the lifetime of the process, so side‑table
    /// entries from separate parses (REPL lines) never collide.
    pub fn fresh() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A **literal constant** that appears directly in the source code.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal ‑ stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    Bool(bool),

    Nil,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name = value`
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    /// Infix arithmetic, comparison or equality.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        /// The closing `)` token ‑ retained for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// `object.name`
    Get { object: Box<Expr>, name: Token },

    /// `object.name = value`
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This { id: ExprId, keyword: Token },

    /// `super.method`
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },

    Grouping(Box<Expr>),

    Literal(LiteralValue),

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Unary { operator: Token, right: Box<Expr> },

    Variable { id: ExprId, name: Token },

    /// `fun (params) { body }` in expression position.
    AnonymousFunction(Rc<FunctionDecl>),
}

/// Parameters and body shared by named functions, methods and lambdas.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// `None` for anonymous functions.
    pub name: Option<Token>,

    /// Parameter name tokens (arity ≤ 255).
    pub params: Vec<Token>,

    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt>),

    Class {
        name: Token,
        /// Always an `Expr::Variable` when present.
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },

    Break(Token),

    /// Stand‑alone expression terminated by a semicolon.
    Expression(Expr),

    Function(Rc<FunctionDecl>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    Print(Expr),

    Return {
        /// The `return` keyword token (for error locations).
        keyword: Token,

        /// Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },

    /// `"var" IDENT ("=" initializer)? ";"`.
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// `while` loop; `for` desugars into this.
    While { condition: Expr, body: Box<Stmt> },
}
