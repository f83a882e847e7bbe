//! Module `scanner` implements a one‑pass, streaming lexer for the Lox language.
//!
//! It transforms a source string into a sequence of [`Token`]s, skipping
//! whitespace and comments, and emitting exactly one `EOF` token at the end.
//! Designed as a `FusedIterator`, it can be chained safely with other iterator
//! adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input text.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, LoxError>` on each `.next()`.  An `Err` reports a
//!   lexing error with line information; scanning resumes on the next call so
//!   every error in the source surfaces in a single pass.
//!
//! - `scan_tokens(src, reporter) -> Vec<Token>`
//!   Drains a scanner, forwarding errors to a [`Reporter`].
//!
//! # Structure
//!
//! Each call to `next` first runs `skip_trivia` (whitespace, newlines and
//! `//` comments), then hands the first significant byte to `scan_token`,
//! which dispatches to a recognizer returning the token kind.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`.
//! - Two‑character operators: `!=`, `==`, `<=`, `>=` (greedy).
//! - String literals: `"` … `"`, no escapes, multi‑line allowed.
//! - Numeric literals: digits with an optional `.` *followed by a digit*.
//! - Identifiers/keywords: a letter followed by alphanumerics or `_`,
//!   resolved via a perfect‑hash `KEYWORDS` map on the whole lexeme.
//!
//! # Example
//!
//! ```rust
//! use rox::scanner::Scanner;
//!
//! let source = "print 123; // example";
//! for result in Scanner::new(source) {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{LoxError, Reporter, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"break"  => TokenType::BREAK,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.
pub struct Scanner<'a> {
    source: &'a str, // entire source text
    bytes: &'a [u8], // byte view of `source`
    start: usize,    // first byte of the lexeme being scanned
    curr: usize,     // one past the last byte consumed
    line: usize,     // 1‑based, bumped on every '\n'
    done: bool,      // EOF already yielded
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        info!("Scanner created over {} bytes", source.len());

        Self {
            source,
            bytes: source.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            done: false,
        }
    }

    // ─────────────────────────── cursor helpers ───────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.bytes.len()
    }

    /// Byte `offset` positions past the cursor, or `0` beyond the input.
    #[inline(always)]
    fn byte_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.curr + offset).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn bump(&mut self) -> u8 {
        let b: u8 = self.byte_at(0);
        self.curr += 1;
        b
    }

    /// Consume the next byte iff it is `expected`.
    #[inline(always)]
    fn eat(&mut self, expected: u8) -> bool {
        let hit: bool = !self.is_at_end() && self.byte_at(0) == expected;
        if hit {
            self.curr += 1;
        }
        hit
    }

    #[inline(always)]
    fn lexeme(&self) -> &'a str {
        let source: &'a str = self.source;
        &source[self.start..self.curr]
    }

    /// `single` or, when followed by `=`, `double`.
    #[inline(always)]
    fn with_equal(&mut self, double: TokenType, single: TokenType) -> TokenType {
        if self.eat(b'=') {
            double
        } else {
            single
        }
    }

    // ─────────────────────────── trivia ───────────────────────────────────

    /// Consume whitespace, newlines and line comments before the next token.
    fn skip_trivia(&mut self) {
        loop {
            match self.byte_at(0) {
                b' ' | b'\r' | b'\t' => self.curr += 1,

                b'\n' => {
                    self.line += 1;
                    self.curr += 1;
                }

                // Stop *at* the newline so the line counter sees it.
                b'/' if self.byte_at(1) == b'/' => {
                    self.curr = match memchr(b'\n', &self.bytes[self.curr..]) {
                        Some(pos) => self.curr + pos,
                        None => self.bytes.len(),
                    };
                }

                _ => return,
            }
        }
    }

    // ─────────────────────────── recognizers ──────────────────────────────

    /// Scan one token starting at `self.start`.
    fn scan_token(&mut self) -> Result<TokenType> {
        let tt: TokenType = match self.bump() {
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'-' => TokenType::MINUS,
            b'+' => TokenType::PLUS,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,
            b'/' => TokenType::SLASH,

            b'!' => self.with_equal(TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.with_equal(TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.with_equal(TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.with_equal(TokenType::GREATER_EQUAL, TokenType::GREATER),

            b'"' => self.string()?,
            b'0'..=b'9' => self.number(),
            b'a'..=b'z' | b'A'..=b'Z' => self.identifier(),

            _ => return Err(self.unexpected()),
        };

        Ok(tt)
    }

    /// The whole UTF‑8 character at `start` is consumed so the next lexeme
    /// begins on a character boundary.
    fn unexpected(&mut self) -> LoxError {
        let c: char = self.source[self.start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.curr = self.start + c.len_utf8();

        LoxError::lex(self.line, format!("Unexpected character: {}", c))
    }

    /// `"` … `"` with no escapes; may span lines.
    fn string(&mut self) -> Result<TokenType> {
        let close: Option<usize> = memchr(b'"', &self.bytes[self.curr..]);

        let Some(offset) = close else {
            self.line += self.bytes[self.curr..].iter().filter(|&&b| b == b'\n').count();
            self.curr = self.bytes.len();

            return Err(LoxError::lex(self.line, "Unterminated string."));
        };

        let source: &'a str = self.source;
        let body: &'a str = &source[self.curr..self.curr + offset];
        self.line += body.bytes().filter(|&b| b == b'\n').count();
        self.curr += offset + 1;

        Ok(TokenType::STRING(body.to_owned()))
    }

    /// `123`, `3.14`.  A `.` is only part of the number when a digit follows,
    /// so `1.` scans as NUMBER then DOT.
    fn number(&mut self) -> TokenType {
        while self.byte_at(0).is_ascii_digit() {
            self.curr += 1;
        }

        if self.byte_at(0) == b'.' && self.byte_at(1).is_ascii_digit() {
            self.curr += 1;

            while self.byte_at(0).is_ascii_digit() {
                self.curr += 1;
            }
        }

        // Digits with at most one interior dot always parse.
        TokenType::NUMBER(self.lexeme().parse::<f64>().unwrap_or_default())
    }

    /// Maximal munch, then a keyword lookup on the whole lexeme.
    fn identifier(&mut self) -> TokenType {
        while matches!(self.byte_at(0), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.curr += 1;
        }

        KEYWORDS
            .get(self.lexeme().as_bytes())
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.skip_trivia();
        self.start = self.curr;

        if self.is_at_end() {
            self.done = true;
            return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
        }

        let item: Result<Token> = self
            .scan_token()
            .map(|tt| Token::new(tt, self.lexeme(), self.line));

        if let Ok(token) = &item {
            debug!("Scanned {} on line {}", token.token_type.name(), token.line);
        }

        Some(item)
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan `source` completely.  Errors go to `reporter`; the returned vector
/// always ends with the `EOF` token.
pub fn scan_tokens(source: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for result in Scanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => reporter.error(e),
        }
    }

    info!("Scanned {} tokens", tokens.len());

    tokens
}
