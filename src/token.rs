use log::trace;
use serde::Serialize;
use std::fmt;
use std::mem;

/// Token kinds.  Literal kinds carry their decoded value; everything else is
/// fully described by the lexeme.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Serialize)]
pub enum TokenType {
    // Single‑character punctuation.
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    DOT,
    MINUS,
    PLUS,
    SEMICOLON,
    SLASH,
    STAR,

    // One or two characters.
    BANG,
    BANG_EQUAL,
    EQUAL,
    EQUAL_EQUAL,
    GREATER,
    GREATER_EQUAL,
    LESS,
    LESS_EQUAL,

    // Literals.
    IDENTIFIER,
    /// String contents without the quotes.
    STRING(String),
    NUMBER(f64),

    // Keywords.
    AND,
    BREAK,
    CLASS,
    ELSE,
    FALSE,
    FUN,
    FOR,
    IF,
    NIL,
    OR,
    PRINT,
    RETURN,
    SUPER,
    THIS,
    TRUE,
    VAR,
    WHILE,

    EOF,
}

impl PartialEq for TokenType {
    /// Same variant, payload ignored: `NUMBER(1.0) == NUMBER(2.0)`.
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

impl TokenType {
    /// Variant name without payload, as printed by `tokenize`.
    pub fn name(&self) -> String {
        match self {
            TokenType::STRING(_) => "STRING".to_string(),
            TokenType::NUMBER(_) => "NUMBER".to_string(),
            unit => format!("{:?}", unit),
        }
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
///
/// Tokens own their lexeme so the AST built from them can outlive the
/// source buffer (REPL lines are dropped after each evaluation while the
/// closures they defined live on).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: String,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl Token {
    /// Create a new Token with the given type, lexeme, and line.
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, line: usize) -> Self {
        let lexeme: String = lexeme.into();

        trace!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type,
            lexeme,
            line
        );

        Self {
            token_type,
            lexeme,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 3 → "3.0", 3.14 → "3.14"
        let literal: String = match &self.token_type {
            TokenType::STRING(s) => s.clone(),
            TokenType::NUMBER(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                format!("{}.0", buf.format(*n as i64))
            }
            TokenType::NUMBER(n) => n.to_string(),
            _ => "null".to_string(),
        };

        write!(f, "{} {} {}", self.token_type.name(), self.lexeme, literal)
    }
}
