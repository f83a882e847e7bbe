#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::error::{Diagnostics, LoxError};
use rox::parser::Parser;
use rox::scanner::scan_tokens;
use rox::session::Lox;

/// In‑memory `print` sink that the test keeps a handle to.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session whose printed output lands in the returned buffer.
pub fn session() -> (Lox, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let lox = Lox::with_output(Box::new(buffer.clone()));
    (lox, buffer)
}

/// Run `source` as a program; returns everything it printed, plus the exit code.
pub fn run_source(source: &str) -> (String, i32) {
    let (mut lox, buffer) = session();
    lox.run(source);
    (buffer.contents(), lox.exit_code())
}

/// Run `source` and return printed output, asserting no error of any kind.
pub fn run_ok(source: &str) -> String {
    let (mut lox, buffer) = session();
    lox.run(source);
    assert_eq!(
        lox.exit_code(),
        0,
        "unexpected diagnostics: {:?} / {:?}",
        lox.diagnostics().errors(),
        lox.diagnostics().runtime_errors()
    );
    buffer.contents()
}

/// Run `source` and return the single runtime error it must raise, along
/// with whatever was printed before it.
pub fn run_runtime_error(source: &str) -> (String, String) {
    let (mut lox, buffer) = session();
    lox.run(source);
    let diagnostics = lox.diagnostics();
    assert!(!diagnostics.had_error(), "static errors: {:?}", diagnostics.errors());
    assert_eq!(diagnostics.runtime_errors().len(), 1);
    (buffer.contents(), diagnostics.runtime_errors()[0].to_string())
}

/// Scan and parse `source`, returning the statements and every static error.
pub fn parse_source(source: &str) -> (Vec<rox::ast::Stmt>, Vec<String>) {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan_tokens(source, &mut diagnostics);
    let statements = Parser::new(&tokens, &mut diagnostics).parse();
    (statements, messages(diagnostics.errors()))
}

pub fn messages(errors: &[LoxError]) -> Vec<String> {
    errors.iter().map(|e| e.to_string()).collect()
}
