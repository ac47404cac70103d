/*!
Recursive-descent parser for Rill.

Grammar (EBNF, condensed)
-------------------------

```text
program        → declaration* EOF ;
declaration    → classDecl | fnDecl | letDecl | statement ;
classDecl      → "class" IDENT "{" memberDecl* "}" ;
memberDecl     → "static"? ( fnMember | letMember ) ;
fnMember       → "fn" IDENT fnLiteral ;
letMember      → "let" "mut"? IDENT ( "=" expression )? ";" ;
fnDecl         → "fn" IDENT fnLiteral ;          // sugar: let IDENT = fn-literal
letDecl        → "let" "mut"? IDENT ( "=" expression )? ";" ;
statement      → ifStmt | forStmt | whileStmt | returnStmt
               | breakStmt | continueStmt | block | exprStmt ;
ifStmt         → "if" expression bracedStmt ( "else" ( ifStmt | bracedStmt ) )? ;
whileStmt      → "while" expression bracedStmt ;
forStmt        → "for" ( letDecl | exprStmt | ";" )
                 expression? ";" expression? bracedStmt ;    // desugars to while
returnStmt     → "return" expression? ";" ;
block          → "{" declaration* "}" ;
bracedStmt     → block ;                         // non-block body is reported

expression     → assignment ( "," assignment )* ;            // comma operator
assignment     → ( variable | getExpr )
                 ( "=" | "+=" | "-=" | "*=" | "/=" ) assignment
               | ternary ;
ternary        → logic_or ( "?" expression ":" assignment )? ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality ( "and" equality )* ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" | "+" ) unary | call ;
call           → primary ( "(" arguments? ")" | "." IDENT )* ;
arguments      → assignment ( "," assignment )* ;            // ≤ 255
fnLiteral      → "(" parameters? ")" block ;                 // ≤ 255 params
primary        → NUMBER | STRING | "true" | "false" | "nil"
               | IDENT | "self" | "fn" fnLiteral | "(" expression ")" ;
```

Error handling: a statement that fails to parse triggers panic-mode
recovery — tokens are discarded up to the next statement boundary (a `;`
or a token that begins a declaration), the partial statement is dropped,
and parsing resumes.  `parse` itself never fails; everything goes through
the shared [`Reporter`].

Compound assignment desugars at parse time (`a += b` ⇒ `a = a + b` with a
synthesized operator token), and `for` desugars into a `while` wrapped in
a block, so later passes only ever see the core statement set.
*/

use log::{debug, info};

use crate::diagnostics::{Diagnostic, Reporter};
use crate::error::{Result, RillError};
use crate::expr::{Expr, ExprId, LiteralValue};
use crate::stmt::{Stmt, VarDecl};
use crate::token::{Position, Token, TokenType};

/// Hard cap on parameter and argument list lengths.
const MAX_ARITY: usize = 255;

/// Top-level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    next_expr_id: usize,
    reporter: Reporter,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], reporter: Reporter) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            next_expr_id: 0,
            reporter,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program, collecting as many statements as possible.
    /// Failing statements are reported and omitted from the result.
    pub fn parse(&mut self) -> Vec<Stmt> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        statements
    }

    /// Parse the input as a single expression (the CLI `parse`
    /// subcommand).  Failure is reported and yields `None`.
    pub fn parse_expression(&mut self) -> Option<Expr> {
        match self.expression() {
            Ok(expr) => Some(expr),
            Err(err) => {
                self.reporter.report_error(&err);
                None
            }
        }
    }

    // ──────────────────────── declaration rules ───────────────────

    /// One declaration, with panic-mode recovery on failure.
    fn declaration(&mut self) -> Option<Stmt> {
        debug!("Entering declaration");

        let result = if self.matches(TokenType::CLASS) {
            self.class_declaration()
        } else if self.matches(TokenType::FN) {
            self.fn_declaration()
        } else if self.matches(TokenType::LET) {
            self.let_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.reporter.report_error(&err);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self
            .consume(TokenType::IDENTIFIER, "Expected class name")?
            .clone();

        self.consume(TokenType::LEFT_BRACE, "Expected '{' before class body")?;

        let mut members: Vec<VarDecl> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            let is_static = self.matches(TokenType::STATIC);

            if self.matches(TokenType::FN) {
                members.push(self.fn_member(is_static)?);
            } else if self.matches(TokenType::LET) {
                members.push(self.let_member(is_static)?);
            } else {
                // Anything else inside a class body: report it, then parse
                // and discard the whole statement so member collection can
                // resume cleanly after it.
                let bad = self.peek().clone();
                self.reporter.report(
                    Diagnostic::new(
                        bad.position,
                        "Only 'fn' and 'let' declarations are allowed in a class body",
                    )
                    .at_lexeme(bad.lexeme),
                );
                self.statement()?;
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expected '}' after class body")?;

        Ok(Stmt::Class { name, members })
    }

    fn fn_member(&mut self, is_static: bool) -> Result<VarDecl> {
        let name: Token = self
            .consume(TokenType::IDENTIFIER, "Expected method name")?
            .clone();
        let position = name.position;
        let literal = self.fn_literal("method", position)?;

        Ok(VarDecl {
            name,
            initializer: Some(literal),
            mutable: false,
            is_static,
        })
    }

    fn let_member(&mut self, is_static: bool) -> Result<VarDecl> {
        let mut decl = self.let_decl_inner()?;
        decl.is_static = is_static;

        Ok(decl)
    }

    /// `fn name(...) { ... }` — sugar for a `let` binding a function
    /// literal under the declared name.
    fn fn_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self
            .consume(TokenType::IDENTIFIER, "Expected function name")?
            .clone();
        let position = name.position;
        let literal = self.fn_literal("function", position)?;

        Ok(Stmt::Var(VarDecl {
            name,
            initializer: Some(literal),
            mutable: false,
            is_static: false,
        }))
    }

    /// Parameter list and body of a function literal.  The `fn` keyword
    /// (and the name, for declarations) has already been consumed.
    fn fn_literal(&mut self, kind: &str, position: Position) -> Result<Expr> {
        self.consume(
            TokenType::LEFT_PAREN,
            format!("Expected '(' after {} name", kind),
        )?;

        let mut params: Vec<Token> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARITY {
                    // reported, not fatal — keep consuming the list
                    let at = self.peek().clone();
                    self.reporter.report(
                        Diagnostic::new(
                            at.position,
                            format!("Can't have more than {} parameters", MAX_ARITY),
                        )
                        .at_lexeme(at.lexeme),
                    );
                }

                params.push(
                    self.consume(TokenType::IDENTIFIER, "Expected parameter name")?
                        .clone(),
                );

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after parameters")?;
        self.consume(
            TokenType::LEFT_BRACE,
            format!("Expected '{{' before {} body", kind),
        )?;

        let body = self.block()?;

        Ok(Expr::Fn {
            position,
            params,
            body,
        })
    }

    fn let_declaration(&mut self) -> Result<Stmt> {
        Ok(Stmt::Var(self.let_decl_inner()?))
    }

    fn let_decl_inner(&mut self) -> Result<VarDecl> {
        let mutable = self.matches(TokenType::MUT);

        let name: Token = self
            .consume(TokenType::IDENTIFIER, "Expected variable name")?
            .clone();

        let initializer: Option<Expr> = if self.matches(TokenType::EQUAL) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::SEMICOLON,
            "Expected ';' after variable declaration",
        )?;

        Ok(VarDecl {
            name,
            initializer,
            mutable,
            is_static: false,
        })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::FOR) {
            self.for_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else if self.matches(TokenType::BREAK) {
            let keyword = self.previous().clone();
            self.consume(TokenType::SEMICOLON, "Expected ';' after 'break'")?;
            Ok(Stmt::Break(keyword))
        } else if self.matches(TokenType::CONTINUE) {
            let keyword = self.previous().clone();
            self.consume(TokenType::SEMICOLON, "Expected ';' after 'continue'")?;
            Ok(Stmt::Continue(keyword))
        } else if self.matches(TokenType::LEFT_BRACE) {
            Ok(Stmt::Block(self.block()?))
        } else {
            self.expression_statement()
        }
    }

    /// `for init; cond; incr { body }` desugars at parse time into
    /// `{ init; while cond { body; incr; } }`, with a missing condition
    /// defaulting to `true`.
    fn for_statement(&mut self) -> Result<Stmt> {
        let for_pos = self.previous().position;

        let initializer: Option<Stmt> = if self.matches(TokenType::SEMICOLON) {
            None
        } else if self.matches(TokenType::LET) {
            Some(self.let_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenType::SEMICOLON, "Expected ';' after loop condition")?;

        let increment: Option<Expr> = if !self.check(TokenType::LEFT_BRACE) {
            Some(self.expression()?)
        } else {
            None
        };

        let mut body = self.braced_statement()?;

        if let Some(incr) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(incr)]);
        }

        let condition = condition.unwrap_or(Expr::Literal {
            value: LiteralValue::True,
            position: for_pos,
        });

        let mut desugared = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(init) = initializer {
            desugared = Stmt::Block(vec![init, desugared]);
        }

        Ok(desugared)
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.expression()?;
        let then_branch = Box::new(self.braced_statement()?);

        let else_branch: Option<Box<Stmt>> = if self.matches(TokenType::ELSE) {
            // `else if` chains reuse the statement rule; a plain `else`
            // body must be braced.
            if self.check(TokenType::IF) {
                Some(Box::new(self.statement()?))
            } else {
                Some(Box::new(self.braced_statement()?))
            }
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
        let condition: Expr = self.expression()?;
        let body = Box::new(self.braced_statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword: Token = self.previous().clone();

        let value: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expected ';' after return value")?;

        Ok(Stmt::Return { keyword, value })
    }

    /// Loop and conditional bodies must be braced.  A non-block body is
    /// reported (non-fatally) and then parsed as an ordinary statement so
    /// recovery stays local.
    fn braced_statement(&mut self) -> Result<Stmt> {
        if !self.check(TokenType::LEFT_BRACE) {
            let at = self.peek().clone();
            self.reporter.report(
                Diagnostic::new(at.position, "Expected '{' before body").at_lexeme(at.lexeme),
            );
        }

        self.statement()
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;
        self.consume(TokenType::SEMICOLON, "Expected ';' after expression")?;

        Ok(Stmt::Expression(expr))
    }

    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expected '}' after block")?;

        Ok(statements)
    }

    // ─────────────────────── expression rules ─────────────────────

    /// Comma operator: left-associative, lowest precedence.  Both operands
    /// are kept so the evaluator can run the left for its side effects.
    fn expression(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.assignment()?;

        while self.matches(TokenType::COMMA) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.assignment()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.ternary()?;

        if self.matches(TokenType::EQUAL)
            || self.matches(TokenType::PLUS_EQUAL)
            || self.matches(TokenType::MINUS_EQUAL)
            || self.matches(TokenType::STAR_EQUAL)
            || self.matches(TokenType::SLASH_EQUAL)
        {
            let op: Token = self.previous().clone();
            let mut value: Expr = self.assignment()?;

            // `a += b` becomes `a = a + b` with a synthesized operator
            // token carrying the compound operator's position.
            if let Some((tt, lexeme)) = desugared_operator(&op.token_type) {
                value = Expr::Binary {
                    left: Box::new(expr.clone()),
                    operator: Token::synthetic(tt, lexeme, op.position),
                    right: Box::new(value),
                };
            }

            return Ok(match expr {
                Expr::Variable { name, .. } => Expr::Assign {
                    id: self.next_id(),
                    name,
                    value: Box::new(value),
                },

                Expr::Get { object, name } => Expr::Set {
                    object,
                    name,
                    value: Box::new(value),
                },

                _ => {
                    // Reported but not fatal: hand downstream passes a
                    // well-formed node with a synthesized target.
                    self.reporter.report(
                        Diagnostic::new(op.position, "Invalid assignment target")
                            .at_lexeme(op.lexeme),
                    );

                    Expr::Assign {
                        id: self.next_id(),
                        name: Token::synthetic(TokenType::IDENTIFIER, "", op.position),
                        value: Box::new(value),
                    }
                }
            });
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> Result<Expr> {
        let expr: Expr = self.logical_or()?;

        if self.matches(TokenType::QUESTION) {
            let on_true: Expr = self.expression()?;

            // A seen '?' without its ':' is a hard parse error.
            self.consume(TokenType::COLON, "Expected ':' in ternary expression")?;

            let on_false: Expr = self.assignment()?;

            return Ok(Expr::Ternary {
                condition: Box::new(expr),
                on_true: Box::new(on_true),
                on_false: Box::new(on_false),
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

    fn equality(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.comparison()?;

        while self.matches(TokenType::BANG_EQUAL) || self.matches(TokenType::EQUAL_EQUAL) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.comparison()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.term()?;

        while self.matches(TokenType::GREATER)
            || self.matches(TokenType::GREATER_EQUAL)
            || self.matches(TokenType::LESS)
            || self.matches(TokenType::LESS_EQUAL)
        {
            let operator: Token = self.previous().clone();
            let right: Expr = self.term()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.factor()?;

        while self.matches(TokenType::MINUS) || self.matches(TokenType::PLUS) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.factor()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.unary()?;

        while self.matches(TokenType::STAR) || self.matches(TokenType::SLASH) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::BANG)
            || self.matches(TokenType::MINUS)
            || self.matches(TokenType::PLUS)
        {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    /// Chained calls and property access build left-to-right:
    /// `a()()`, `a.b.c()`.
    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        loop {
            if self.matches(TokenType::LEFT_PAREN) {
                expr = self.finish_call(expr)?;
            } else if self.matches(TokenType::DOT) {
                let name: Token = self
                    .consume(TokenType::IDENTIFIER, "Expected property name after '.'")?
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
                    let at = self.peek().clone();
                    self.reporter.report(
                        Diagnostic::new(
                            at.position,
                            format!("Can't have more than {} arguments", MAX_ARITY),
                        )
                        .at_lexeme(at.lexeme),
                    );
                }

                // assignment, not expression: ',' separates arguments here
                arguments.push(self.assignment()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        let paren: Token = self
            .consume(TokenType::RIGHT_PAREN, "Expected ')' after arguments")?
            .clone();

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::FALSE) {
            return Ok(Expr::Literal {
                value: LiteralValue::False,
                position: self.previous().position,
            });
        }

        if self.matches(TokenType::TRUE) {
            return Ok(Expr::Literal {
                value: LiteralValue::True,
                position: self.previous().position,
            });
        }

        if self.matches(TokenType::NIL) {
            return Ok(Expr::Literal {
                value: LiteralValue::Nil,
                position: self.previous().position,
            });
        }

        if self.matches(TokenType::NUMBER(0.0)) {
            let prev = self.previous();

            if let TokenType::NUMBER(n) = prev.token_type {
                return Ok(Expr::Literal {
                    value: LiteralValue::Number(n),
                    position: prev.position,
                });
            }
        }

        if self.matches(TokenType::STRING(String::new())) {
            let prev = self.previous();

            if let TokenType::STRING(ref s) = prev.token_type {
                return Ok(Expr::Literal {
                    value: LiteralValue::Str(s.clone()),
                    position: prev.position,
                });
            }
        }

        if self.matches(TokenType::IDENTIFIER) {
            return Ok(Expr::Variable {
                id: self.next_id(),
                name: self.previous().clone(),
            });
        }

        if self.matches(TokenType::SELF) {
            return Ok(Expr::SelfRef {
                id: self.next_id(),
                keyword: self.previous().clone(),
            });
        }

        if self.matches(TokenType::FN) {
            let position = self.previous().position;
            return self.fn_literal("fn literal", position);
        }

        if self.matches(TokenType::LEFT_PAREN) {
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expected ')' after expression")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        let at = self.peek();
        Err(RillError::parse(
            at.position,
            at.lexeme.clone(),
            "Expected expression",
        ))
    }

    // ────────────────────── utility helpers ───────────────────────

    fn next_id(&mut self) -> ExprId {
        let id = ExprId(self.next_expr_id);
        self.next_expr_id += 1;
        id
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume<M: Into<String>>(&mut self, ttype: TokenType, message: M) -> Result<&Token> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        let at = self.peek();
        Err(RillError::parse(at.position, at.lexeme.clone(), message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &Token {
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
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Discard tokens until a plausible statement boundary.
    fn synchronize(&mut self) {
        self.advance(); // skip the token that caused the error

        while !self.is_at_end() {
            if matches!(self.previous().token_type, TokenType::SEMICOLON) {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FN
                | TokenType::LET
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::RETURN => return,
                _ => {}
            }

            self.advance();
        }
    }
}

/// Binary operator hiding inside a compound-assignment token, if any.
fn desugared_operator(tt: &TokenType) -> Option<(TokenType, &'static str)> {
    match tt {
        TokenType::PLUS_EQUAL => Some((TokenType::PLUS, "+")),
        TokenType::MINUS_EQUAL => Some((TokenType::MINUS, "-")),
        TokenType::STAR_EQUAL => Some((TokenType::STAR, "*")),
        TokenType::SLASH_EQUAL => Some((TokenType::SLASH, "/")),
        _ => None,
    }
}
