/*!
Recursive‑descent parser: token slice → statement list.

Definitions
-----------
* **n** = number of tokens (including the sole EOF).

Every token is consumed once via `advance()`; error recovery (`synchronize`)
discards at most the tokens up to the next statement boundary, so a parse is
Θ(n).  Call‑stack depth grows with syntactic nesting.

### Error policy

| Situation                                   | Handling                                        |
|---------------------------------------------|-------------------------------------------------|
| Expected token missing (`consume`)          | `Err` unwinds to the nearest `declaration`, which reports it and synchronizes. |
| Invalid assignment target                   | Reported; the left‑hand side is kept as the node.|
| More than 255 parameters / arguments        | Reported; parsing continues past the cap.       |
| `break` outside a loop                      | Reported; the `Break` node is still produced.   |

Callers detect failure through their [`Reporter`], never through the return
value: a partial statement list is always returned.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `declaration`, `statement`   | `debug`| High‑level descent into grammar branches. |

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → declaration* EOF ;
declaration    → classDecl | funDecl | varDecl | statement ;
classDecl      → "class" IDENT ( "<" IDENT )? "{" function* "}" ;
funDecl        → "fun" function ;
function       → IDENT "(" parameters? ")" block ;
varDecl        → "var" IDENT ( "=" expression )? ";" ;
statement      → exprStmt | forStmt | ifStmt | printStmt | returnStmt
               | whileStmt | breakStmt | block ;
forStmt        → "for" "(" ( varDecl | exprStmt | ";" )
                 expression? ";" expression? ")" statement ;
breakStmt      → "break" ";" ;
block          → "{" declaration* "}" ;
parameters     → IDENT ( "," IDENT )* ;
expression     → assignment ;
assignment     → ( call "." )? IDENT "=" assignment | logic_or ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality  ( "and" equality )* ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" ) unary | call ;
call           → primary ( "(" arguments? ")" | "." IDENT )* ;
arguments      → expression ( "," expression )* ;
primary        → NUMBER | STRING | "true" | "false" | "nil" | "this"
               | IDENT | "(" expression ")" | "super" "." IDENT
               | "fun" "(" parameters? ")" block ;
```
*/

use std::rc::Rc;

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::error::{LoxError, Reporter, Result};
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Upper bound on parameters and call arguments.
pub const MAX_ARITY: usize = 255;

/// Result of parsing one REPL line.
#[derive(Debug, Default)]
pub struct Prompt {
    /// Complete statements, in source order.
    pub statements: Vec<Stmt>,

    /// A bare expression at end of input with no `;`.
    pub trailing: Option<Expr>,
}

/// A top‑level REPL item: either a statement or the trailing bare expression.
enum PromptItem {
    Statement(Stmt),
    Trailing(Expr),
}

/// Top‑level parser over an immutable slice of tokens.
///
/// The slice must end with an `EOF` token, as produced by the scanner.
pub struct Parser<'t, 'r> {
    tokens: &'t [Token],
    current: usize,
    loop_depth: usize,
    reporter: &'r mut dyn Reporter,
}

impl<'t, 'r> Parser<'t, 'r> {
    /// Construct a new parser.
    pub fn new(tokens: &'t [Token], reporter: &'r mut dyn Reporter) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            loop_depth: 0,
            reporter,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program.  Statements that failed to parse are dropped
    /// after their error has been reported.
    pub fn parse(&mut self) -> Vec<Stmt> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        info!("Parsed {} top-level statements", statements.len());

        statements
    }

    /// Parse one REPL line.  An expression statement that reaches end of
    /// input without its `;` is returned as [`Prompt::trailing`].
    pub fn parse_prompt(&mut self) -> Prompt {
        info!("Beginning prompt parse");

        let mut prompt: Prompt = Prompt::default();

        while !self.is_at_end() {
            if self.starts_statement() {
                if let Some(stmt) = self.declaration() {
                    prompt.statements.push(stmt);
                }

                continue;
            }

            match self.prompt_item() {
                Ok(PromptItem::Statement(stmt)) => prompt.statements.push(stmt),
                Ok(PromptItem::Trailing(expr)) => prompt.trailing = Some(expr),
                Err(e) => {
                    self.reporter.error(e);
                    self.synchronize();
                }
            }
        }

        prompt
    }

    fn prompt_item(&mut self) -> Result<PromptItem> {
        let expr: Expr = self.expression()?;

        if self.is_at_end() {
            debug!("Bare trailing expression at end of prompt");

            return Ok(PromptItem::Trailing(expr));
        }

        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;

        Ok(PromptItem::Statement(Stmt::Expression(expr)))
    }

    /// Does the current token open something other than an expression
    /// statement?
    fn starts_statement(&self) -> bool {
        match self.peek().token_type {
            TokenType::CLASS
            | TokenType::VAR
            | TokenType::FOR
            | TokenType::IF
            | TokenType::WHILE
            | TokenType::PRINT
            | TokenType::RETURN
            | TokenType::BREAK
            | TokenType::LEFT_BRACE => true,
            TokenType::FUN => self.check_next(TokenType::IDENTIFIER),
            _ => false,
        }
    }

    // ──────────────────────── declaration rules ───────────────────

    /// Statement boundary: parse failures are reported and recovered here.
    fn declaration(&mut self) -> Option<Stmt> {
        debug!("Entering declaration at line {}", self.peek().line);

        let result: Result<Stmt> = if self.matches(TokenType::CLASS) {
            self.class_declaration()
        } else if self.check(TokenType::FUN) && self.check_next(TokenType::IDENTIFIER) {
            self.advance();
            self.function("function").map(Stmt::Function)
        } else if self.matches(TokenType::VAR) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                debug!("Parse failure, synchronizing: {}", e);
                self.reporter.error(e);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self
            .consume(TokenType::IDENTIFIER, "Expect class name.")?
            .clone();

        let superclass: Option<Expr> = if self.matches(TokenType::LESS) {
            let super_name: Token = self
                .consume(TokenType::IDENTIFIER, "Expect superclass name.")?
                .clone();

            Some(Expr::Variable {
                id: ExprId::fresh(),
                name: super_name,
            })
        } else {
            None
        };

        self.consume(TokenType::LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods: Vec<Rc<FunctionDecl>> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after class body.")?;

        debug!(
            "Parsed class '{}' with {} methods",
            name.lexeme,
            methods.len()
        );

        Ok(Stmt::Class {
            name,
            superclass,
            methods,
        })
    }

    /// `IDENT "(" parameters? ")" block`; `kind` only shapes messages.
    fn function(&mut self, kind: &str) -> Result<Rc<FunctionDecl>> {
        let name: Token = self
            .consume(TokenType::IDENTIFIER, &format!("Expect {} name.", kind))?
            .clone();

        self.function_body(Some(name), kind)
    }

    /// Parameter list and body, shared by declarations and lambdas.
    fn function_body(&mut self, name: Option<Token>, kind: &str) -> Result<Rc<FunctionDecl>> {
        self.consume(
            TokenType::LEFT_PAREN,
            &format!("Expect '(' after {} name.", kind),
        )?;

        let mut params: Vec<Token> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARITY {
                    let e = LoxError::parse(self.peek(), "Can't have more than 255 parameters.");
                    self.reporter.error(e);
                }

                params.push(
                    self.consume(TokenType::IDENTIFIER, "Expect parameter name.")?
                        .clone(),
                );

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after parameters.")?;
        self.consume(
            TokenType::LEFT_BRACE,
            &format!("Expect '{{' before {} body.", kind),
        )?;

        // `break` never crosses a function boundary.
        let enclosing_loops: usize = std::mem::replace(&mut self.loop_depth, 0);
        let body: Result<Vec<Stmt>> = self.block();
        self.loop_depth = enclosing_loops;

        Ok(Rc::new(FunctionDecl {
            name,
            params,
            body: body?,
        }))
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self
            .consume(TokenType::IDENTIFIER, "Expect variable name.")?
            .clone();

        let initializer: Option<Expr> = if self.matches(TokenType::EQUAL) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::SEMICOLON,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        debug!("Entering statement: {}", self.peek().token_type.name());

        if self.matches(TokenType::FOR) {
            self.for_statement()
        } else if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else if self.matches(TokenType::BREAK) {
            self.break_statement()
        } else if self.matches(TokenType::LEFT_BRACE) {
            Ok(Stmt::Block(self.block()?))
        } else if self.matches(TokenType::PRINT) {
            self.print_statement()
        } else {
            self.expression_statement()
        }
    }

    /// `for` is sugar: `{ init; while (cond) { body; increment; } }`.
    fn for_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer: Option<Stmt> = if self.matches(TokenType::SEMICOLON) {
            None
        } else if self.matches(TokenType::VAR) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after loop condition.")?;

        let increment: Option<Expr> = if !self.check(TokenType::RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let mut body: Stmt = self.loop_body()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition: Expr = condition.unwrap_or(Expr::Literal(LiteralValue::Bool(true)));

        let mut desugared: Stmt = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            desugared = Stmt::Block(vec![initializer, desugared]);
        }

        Ok(desugared)
    }

    /// Parse a loop body with the loop depth raised.
    fn loop_body(&mut self) -> Result<Stmt> {
        self.loop_depth += 1;
        let body: Result<Stmt> = self.statement();
        self.loop_depth -= 1;

        body
    }

    fn break_statement(&mut self) -> Result<Stmt> {
        let keyword: Token = self.previous().clone();

        if self.loop_depth == 0 {
            let e = LoxError::parse(&keyword, "Must be inside a loop to use 'break'.");
            self.reporter.error(e);
        }

        self.consume(TokenType::SEMICOLON, "Expect ';' after 'break'.")?;

        Ok(Stmt::Break(keyword))
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        let value: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after value.")?;

        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;

        Ok(Stmt::Expression(expr))
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch: Box<Stmt> = Box::new(self.statement()?);
        let else_branch: Option<Box<Stmt>> = if self.matches(TokenType::ELSE) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;
        let body: Box<Stmt> = Box::new(self.loop_body()?);

        Ok(Stmt::While { condition, body })
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword: Token = self.previous().clone();
        let value: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after return value.")?;

        Ok(Stmt::Return { keyword, value })
    }

    /// Declarations up to the closing `}` (the `{` is already consumed).
    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.")?;

        Ok(statements)
    }

    // ─────────────────────── expression rules ─────────────────────

    pub fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.logical_or()?;

        if self.matches(TokenType::EQUAL) {
            let equals: Token = self.previous().clone();
            let value: Expr = self.assignment()?;

            return Ok(match expr {
                Expr::Variable { id, name } => Expr::Assign {
                    id,
                    name,
                    value: Box::new(value),
                },

                Expr::Get { object, name } => Expr::Set {
                    object,
                    name,
                    value: Box::new(value),
                },

                other => {
                    // Reported, not raised: the statement still parses.
                    let e = LoxError::parse(&equals, "Invalid assignment target.");
                    self.reporter.error(e);
                    other
                }
            });
        }

        Ok(expr)
    }

    fn logical_or(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.logical_and()?;

        while self.matches(TokenType::OR) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.logical_and()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.equality()?;

        while self.matches(TokenType::AND) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.equality()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// One left‑associative binary precedence level.
    fn binary_level(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let mut expr: Expr = operand(self)?;

        while operators.iter().any(|op| self.check(op.clone())) {
            let operator: Token = self.advance().clone();
            let right: Expr = operand(self)?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        self.binary_level(
            &[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.binary_level(
            &[
                TokenType::GREATER,
                TokenType::GREATER_EQUAL,
                TokenType::LESS,
                TokenType::LESS_EQUAL,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.binary_level(&[TokenType::MINUS, TokenType::PLUS], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr> {
        self.binary_level(&[TokenType::STAR, TokenType::SLASH], Self::unary)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::BANG) || self.matches(TokenType::MINUS) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        loop {
            if self.matches(TokenType::LEFT_PAREN) {
                expr = self.finish_call(expr)?;
            } else if self.matches(TokenType::DOT) {
                let name: Token = self
                    .consume(TokenType::IDENTIFIER, "Expect property name after '.'.")?
                    .clone();

                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if arguments.len() >= MAX_ARITY {
                    let e = LoxError::parse(self.peek(), "Can't have more than 255 arguments.");
                    self.reporter.error(e);
                }

                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        let paren: Token = self
            .consume(TokenType::RIGHT_PAREN, "Expect ')' after arguments.")?
            .clone();

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        let token: &'t Token = self.peek();

        let expr: Expr = match &token.token_type {
            TokenType::FALSE => Expr::Literal(LiteralValue::Bool(false)),
            TokenType::TRUE => Expr::Literal(LiteralValue::Bool(true)),
            TokenType::NIL => Expr::Literal(LiteralValue::Nil),
            TokenType::NUMBER(n) => Expr::Literal(LiteralValue::Number(*n)),
            TokenType::STRING(s) => Expr::Literal(LiteralValue::Str(s.clone())),

            TokenType::THIS => Expr::This {
                id: ExprId::fresh(),
                keyword: token.clone(),
            },

            TokenType::IDENTIFIER => Expr::Variable {
                id: ExprId::fresh(),
                name: token.clone(),
            },

            TokenType::SUPER => {
                self.advance();
                self.consume(TokenType::DOT, "Expect '.' after 'super'.")?;
                let method: Token = self
                    .consume(TokenType::IDENTIFIER, "Expect superclass method name.")?
                    .clone();

                return Ok(Expr::Super {
                    id: ExprId::fresh(),
                    keyword: token.clone(),
                    method,
                });
            }

            TokenType::FUN => {
                self.advance();

                return Ok(Expr::AnonymousFunction(self.function_body(None, "function")?));
            }

            TokenType::LEFT_PAREN => {
                self.advance();
                let inner: Expr = self.expression()?;
                self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

                return Ok(Expr::Grouping(Box::new(inner)));
            }

            _ => return Err(LoxError::parse(token, "Expect expression.")),
        };

        self.advance();

        Ok(expr)
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'t Token> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        Err(LoxError::parse(self.peek(), message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    /// Like [`check`], one token further ahead.
    #[inline(always)]
    fn check_next(&self, ttype: TokenType) -> bool {
        match self.tokens.get(self.current + 1) {
            Some(token) => token.token_type == ttype,
            None => false,
        }
    }

    #[inline(always)]
    fn advance(&mut self) -> &'t Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'t Token {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'t Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Discards tokens until it thinks it is at a statement boundary.
    fn synchronize(&mut self) {
        self.advance(); // skip the token that caused the error

        while !self.is_at_end() {
            if matches!(self.previous().token_type, TokenType::SEMICOLON) {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN
                | TokenType::BREAK => return,
                _ => {}
            }

            self.advance();
        }
    }
}
