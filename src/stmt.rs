use crate::expr::Expr;
use crate::token::Token;

/// A single `let`-style binding: used both as a statement (via
/// [`Stmt::Var`]) and as a class member declaration.  Named `fn`
/// declarations desugar to one of these with an [`Expr::Fn`] initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Token,

    pub initializer: Option<Expr>,

    /// Declared with `let mut`?  Reassignment of an immutable binding is a
    /// resolver error.
    pub mutable: bool,

    /// Declared with `static` inside a class body.  Always `false` outside
    /// class members.
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Stand-alone expression terminated by a semicolon.
    Expression(Expr),

    /// `let [mut] name [= initializer];` — also the desugared form of
    /// `fn name(...) { ... }`.
    Var(VarDecl),

    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt>),

    /// `if` / `else` conditional.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while` loop.  `for` loops desugar to this at parse time.
    While { condition: Expr, body: Box<Stmt> },

    /// `return` statement inside a function body.
    Return {
        /// The `return` keyword token (for error locations).
        keyword: Token,

        /// Optional expression to return.  Absent ⇒ `nil`.
        value: Option<Expr>,
    },

    /// `break;` — terminates the innermost enclosing loop.
    Break(Token),

    /// `continue;` — re-checks the innermost enclosing loop's condition.
    Continue(Token),

    /// Class declaration: methods and field defaults, each optionally
    /// `static`.
    Class {
        name: Token,
        members: Vec<VarDecl>,
    },
}
