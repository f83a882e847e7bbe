//! One interpreter session: the scan → parse → resolve → interpret pipeline
//! behind a file run or a REPL.
//!
//! A session keeps its [`Interpreter`] (and therefore its globals) across
//! calls, so successive REPL lines see each other's definitions.  Static errors
//! stop a run before anything executes; a runtime error aborts the remaining
//! statements of that run only.

use std::io::Write;

use log::{debug, info};

use crate::error::{Diagnostics, Reporter};
use crate::interpreter::Interpreter;
use crate::parser::{Parser, Prompt};
use crate::resolver::Resolver;
use crate::scanner;

pub struct Lox {
    interpreter: Interpreter,
    diagnostics: Diagnostics,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// Session printing to stdout and echoing diagnostics to stderr.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            diagnostics: Diagnostics::echoing(),
        }
    }

    /// Session whose `print` output goes to `out`.  Diagnostics are collected
    /// silently; read them back through [`Lox::diagnostics`].
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Process exit status for everything run so far.
    pub fn exit_code(&self) -> i32 {
        self.diagnostics.exit_code()
    }

    /// Run a whole program.
    pub fn run(&mut self, source: &str) {
        info!("Running {} bytes of source", source.len());

        let tokens = scanner::scan_tokens(source, &mut self.diagnostics);
        let statements = Parser::new(&tokens, &mut self.diagnostics).parse();

        if self.diagnostics.had_error() {
            debug!("Static errors after parse, not executing");
            return;
        }

        let mut resolver = Resolver::new(&mut self.diagnostics);
        resolver.resolve(&statements);
        let locals = resolver.into_locals();

        if self.diagnostics.had_error() {
            debug!("Static errors after resolve, not executing");
            return;
        }

        self.interpreter.resolve(locals);

        if let Err(e) = self.interpreter.interpret(&statements) {
            self.diagnostics.runtime_error(e);
        }
    }

    /// Run one REPL line.  Returns `= <value>` when the line ends in a bare
    /// expression that evaluated successfully.
    ///
    /// The static error flag is cleared afterwards so one bad line does not
    /// poison the rest of the session.
    pub fn run_prompt_line(&mut self, line: &str) -> Option<String> {
        let shown = self.run_prompt(line);
        self.diagnostics.reset();
        shown
    }

    fn run_prompt(&mut self, line: &str) -> Option<String> {
        let tokens = scanner::scan_tokens(line, &mut self.diagnostics);
        let Prompt {
            statements,
            trailing,
        } = Parser::new(&tokens, &mut self.diagnostics).parse_prompt();

        if self.diagnostics.had_error() {
            return None;
        }

        let mut resolver = Resolver::new(&mut self.diagnostics);
        resolver.resolve(&statements);
        if let Some(expr) = &trailing {
            resolver.resolve_expression(expr);
        }
        let locals = resolver.into_locals();

        if self.diagnostics.had_error() {
            return None;
        }

        self.interpreter.resolve(locals);

        if let Err(e) = self.interpreter.interpret(&statements) {
            self.diagnostics.runtime_error(e);
            return None;
        }

        let expr = trailing?;

        match self.interpreter.evaluate(&expr) {
            Ok(value) => Some(format!("= {}", value)),
            Err(e) => {
                self.diagnostics.runtime_error(e);
                None
            }
        }
    }
}
