//! Static resolver pass.
//!
//! One AST walk that does three things:
//! 1. Builds lexical scopes (a stack of name → `{defined, mutable}` maps),
//!    pushed per block, per function body, and per class method.
//! 2. Reports static errors — redeclaration in the same scope, reading a
//!    variable in its own initializer, `return` outside a function,
//!    `break`/`continue` outside a loop, reassigning an immutable
//!    binding.  All are accumulated through the [`Reporter`]; none stop
//!    resolution of the rest of the program.
//! 3. Tells the interpreter, for each variable occurrence, how many
//!    scopes to hop at runtime — or nothing at all, which means "look it
//!    up in the globals by name".
//!
//! Methods get an implicit `self` binding pushed around their body, so
//! `self` resolves exactly like any other captured variable.

use std::collections::HashMap;

use log::{debug, info};

use crate::diagnostics::{Diagnostic, Reporter};
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::{Stmt, VarDecl};
use crate::token::Token;

/// Are we inside a user function?  Validates `return`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Method,
}

#[derive(Debug)]
struct VarState {
    defined: bool,
    mutable: bool,
}

/// Tracks scopes, enforces static rules, and records binding distances by
/// calling back into the interpreter's side table.
pub struct Resolver<'i, 'w> {
    interpreter: &'i mut Interpreter<'w>,
    scopes: Vec<HashMap<String, VarState>>,
    current_function: FunctionType,

    /// Number of enclosing loops in the *current* function body.  Zeroed
    /// when entering a function so `break` can't cross a call boundary.
    loop_depth: usize,

    reporter: Reporter,
}

impl<'i, 'w> Resolver<'i, 'w> {
    pub fn new(interpreter: &'i mut Interpreter<'w>, reporter: Reporter) -> Self {
        info!("Resolver instantiated");

        Resolver {
            interpreter,
            // top-level declarations live in this root scope
            scopes: vec![HashMap::new()],
            current_function: FunctionType::None,
            loop_depth: 0,
            reporter,
        }
    }

    /// Walk all top-level statements.
    pub fn resolve(&mut self, statements: &[Stmt]) {
        info!("Resolving {} top-level statement(s)", statements.len());

        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statement resolution
    // ─────────────────────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),

            Stmt::Var(decl) => self.resolve_var(decl),

            Stmt::Block(statements) => {
                self.begin_scope();

                for stmt in statements {
                    self.resolve_stmt(stmt);
                }

                self.end_scope();
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);

                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);

                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.reporter.report(Diagnostic::new(
                        keyword.position,
                        "Can't return from top-level code",
                    ));
                }

                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }

            Stmt::Break(keyword) => {
                if self.loop_depth == 0 {
                    self.reporter.report(Diagnostic::new(
                        keyword.position,
                        "'break' can only be used inside a loop",
                    ));
                }
            }

            Stmt::Continue(keyword) => {
                if self.loop_depth == 0 {
                    self.reporter.report(Diagnostic::new(
                        keyword.position,
                        "'continue' can only be used inside a loop",
                    ));
                }
            }

            Stmt::Class { name, members } => self.resolve_class(name, members),
        }
    }

    /// `let` declaration (and the desugared `fn name`): pre-declare the
    /// name as not-yet-defined, resolve the initializer, then mark it
    /// defined.  A variable can never refer to itself in its own
    /// initializer — but a function body *can*, because the body's reads
    /// resolve later, from an inner scope.
    fn resolve_var(&mut self, decl: &VarDecl) {
        self.declare(&decl.name, decl.mutable);

        if let Some(initializer) = &decl.initializer {
            self.resolve_expr(initializer);
        }

        self.define(&decl.name);
    }

    fn resolve_class(&mut self, name: &Token, members: &[VarDecl]) {
        self.declare(name, false);

        for member in members {
            match &member.initializer {
                Some(Expr::Fn { params, body, .. }) => self.resolve_method(params, body),

                Some(expr) => self.resolve_expr(expr),

                None => {}
            }
        }

        self.define(name);
    }

    /// A method body resolves like a function with an implicit `self`
    /// binding in a scope wrapped around it.
    fn resolve_method(&mut self, params: &[Token], body: &[Stmt]) {
        self.begin_scope();

        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(
                "self".to_string(),
                VarState {
                    defined: true,
                    mutable: false,
                },
            );
        }

        self.resolve_function(params, body, FunctionType::Method);

        self.end_scope();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expression resolution
    // ─────────────────────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {}

            Expr::Grouping(inner) => self.resolve_expr(inner),

            Expr::Unary { right, .. } => self.resolve_expr(right),

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Ternary {
                condition,
                on_true,
                on_false,
            } => {
                self.resolve_expr(condition);
                self.resolve_expr(on_true);
                self.resolve_expr(on_false);
            }

            Expr::Variable { id, name } => {
                // cannot read a binding inside its own initializer
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme).is_some_and(|state| !state.defined) {
                        self.reporter.report(
                            Diagnostic::new(
                                name.position,
                                "Can't read local variable in its own initializer",
                            )
                            .at_lexeme(name.lexeme.clone()),
                        );
                    }
                }

                self.resolve_local(*id, &name.lexeme);
            }

            Expr::SelfRef { id, keyword } => {
                self.resolve_local(*id, &keyword.lexeme);
            }

            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, &name.lexeme);
                self.check_mutable(name);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);

                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }

            Expr::Fn { params, body, .. } => {
                self.resolve_function(params, body, FunctionType::Function);
            }

            Expr::Get { object, .. } => self.resolve_expr(object),

            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Function helper
    // ─────────────────────────────────────────────────────────────────────

    /// Fresh scope for a function's parameters + body.  `loop_depth` is
    /// zeroed for the duration: a loop outside the function doesn't
    /// legitimize a `break` inside it.
    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], ftype: FunctionType) {
        let enclosing_function = self.current_function;
        let enclosing_loops = self.loop_depth;
        self.current_function = ftype;
        self.loop_depth = 0;

        self.begin_scope();

        for param in params {
            self.declare(param, false);
            self.define(param);
        }

        for stmt in body {
            self.resolve_stmt(stmt);
        }

        self.end_scope();

        self.current_function = enclosing_function;
        self.loop_depth = enclosing_loops;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scope management
    // ─────────────────────────────────────────────────────────────────────

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token, mutable: bool) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if scope.contains_key(&name.lexeme) {
            self.reporter.report(
                Diagnostic::new(
                    name.position,
                    "Already a variable with this name in this scope",
                )
                .at_lexeme(name.lexeme.clone()),
            );
            return;
        }

        scope.insert(
            name.lexeme.clone(),
            VarState {
                defined: false,
                mutable,
            },
        );
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if let Some(state) = scope.get_mut(&name.lexeme) {
                state.defined = true;
            }
        }
    }

    /// Reassignment requires the nearest declaring scope to have marked
    /// the binding mutable.  Unknown names are left for the runtime's
    /// undefined-variable fault.
    fn check_mutable(&mut self, name: &Token) {
        for scope in self.scopes.iter().rev() {
            if let Some(state) = scope.get(&name.lexeme) {
                if !state.mutable {
                    self.reporter.report(
                        Diagnostic::new(
                            name.position,
                            format!(
                                "'{}' is not mutable; declare it with 'let mut'",
                                name.lexeme
                            ),
                        )
                        .at_lexeme(name.lexeme.clone()),
                    );
                }

                return;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Binding-distance helper
    // ─────────────────────────────────────────────────────────────────────

    /// Record this occurrence as a local at some hop count, or leave it
    /// unrecorded — the interpreter then treats it as a global.
    fn resolve_local(&mut self, id: ExprId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                debug!("Resolved '{}' at depth {}", name, depth);
                self.interpreter.note_local(id, depth);
                return;
            }
        }

        debug!("Resolved '{}' as global", name);
    }
}
