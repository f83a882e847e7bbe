//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! All subsystems (scanner, parser, resolver, runtime) convert their internal
//! failure modes into one of the variants defined here.  This enables a uniform
//! `Result<T>` alias throughout the crate and ergonomic inter‑operation with
//! `anyhow` in the binary, while still preserving rich diagnostic detail.
//!
//! The module **does not** decide what a failure means for the process.  That
//! is the job of a [`Reporter`]; the stock implementation is [`Diagnostics`],
//! which records every error handed to it and derives the exit code.

use std::io;
use thiserror::Error;

use log::{info, warn};

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.  `location` is ` at 'lexeme'` or ` at end`.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        location: String,
        line: usize,
    },

    /// Static‑analysis failure found by the resolver.
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error.  Aborts the current batch of statements.
    #[error("{message}\n[line {line}]")]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// ` at 'lexeme'` / ` at end`, as printed after `Error`.
fn location(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            location: location(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        LoxError::Resolve {
            message,
            location: location(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **interpreter**; `token` attributes the line.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", token.line, message);

        LoxError::Runtime {
            message,
            line: token.line,
        }
    }

    /// Source line the error is attributed to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. }
            | LoxError::Parse { line, .. }
            | LoxError::Resolve { line, .. }
            | LoxError::Runtime { line, .. } => Some(*line),
            LoxError::Io(_) => None,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

// ─────────────────────────────────────────────────────────────────────────────
// Reporting hooks
// ─────────────────────────────────────────────────────────────────────────────

/// Sink for diagnostics raised by the pipeline.
///
/// The scanner, parser and resolver call [`Reporter::error`] and keep going;
/// the session calls [`Reporter::runtime_error`] when a batch is aborted.
pub trait Reporter {
    /// Scan, parse or resolve error.
    fn error(&mut self, error: LoxError);

    /// Uncaught runtime error.
    fn runtime_error(&mut self, error: LoxError);
}

/// Collector owned by the caller for the duration of a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<LoxError>,
    runtime_errors: Vec<LoxError>,
    echo: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that also writes every diagnostic to stderr as it arrives.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Any scan, parse or resolve error since the last [`Diagnostics::reset`].
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn had_runtime_error(&self) -> bool {
        !self.runtime_errors.is_empty()
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    pub fn runtime_errors(&self) -> &[LoxError] {
        &self.runtime_errors
    }

    /// Clears the static error flag.  Runtime errors are kept.
    pub fn reset(&mut self) {
        self.errors.clear();
    }

    /// 0 on success, 2 for any static error, 3 for an uncaught runtime error.
    pub fn exit_code(&self) -> i32 {
        if self.had_error() {
            2
        } else if self.had_runtime_error() {
            3
        } else {
            0
        }
    }
}

impl Reporter for Diagnostics {
    fn error(&mut self, error: LoxError) {
        warn!("Static error reported: {}", error);

        if self.echo {
            eprintln!("{}", error);
        }

        self.errors.push(error);
    }

    fn runtime_error(&mut self, error: LoxError) {
        warn!("Runtime error reported: {}", error);

        if self.echo {
            eprintln!("{}", error);
        }

        self.runtime_errors.push(error);
    }
}
