//! Tree-walking evaluator.
//!
//! Executes a resolved statement list against the environment chain.
//! Variable reads and writes use the resolver's precomputed hop counts
//! (`locals`, keyed by [`ExprId`]) for O(depth) access; names the resolver
//! never saw fall back to a direct lookup in the global scope.
//!
//! Control flow (`return`, `break`, `continue`) travels as [`Signal`]s in
//! the error channel and is caught only at its legitimate boundary — the
//! call frame for `return`, the loop for `break`/`continue`.  Signals are
//! never diagnostics; one reaching the top-level statement loop is an
//! interpreter bug, not a user error.  Runtime faults use the same channel
//! but unwind all the way out, halting the remaining top-level statements.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::rc::Rc;

use log::{debug, info};

use crate::diagnostics::{Diagnostic, Reporter};
use crate::environment::{EnvRef, Environment};
use crate::expr::{Expr, ExprId, LiteralValue};
use crate::native::NativeFunction;
use crate::stmt::{Stmt, VarDecl};
use crate::token::{Position, Token, TokenType};
use crate::value::{Callable, Class, Function, Instance, Value, INITIALIZER};

/// A runtime fault: position plus message, uniform across type errors,
/// undefined names, arity mismatches, and bad call targets.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub position: Position,
    pub message: String,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(position: Position, message: S) -> Self {
        RuntimeError {
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Runtime error: {}", self.position, self.message)
    }
}

/// Non-local exits used during evaluation.  `Fault` is an error; the
/// other three are internal control flow and must never surface.
#[derive(Debug)]
pub enum Signal {
    Fault(RuntimeError),
    Return(Value),
    Break,
    Continue,
}

pub type EvalResult<T> = Result<T, Signal>;

#[inline]
fn fault<T, S: Into<String>>(position: Position, message: S) -> EvalResult<T> {
    Err(Signal::Fault(RuntimeError::new(position, message)))
}

pub struct Interpreter<'w> {
    globals: EnvRef,

    /// Cursor into the environment chain; swapped (and always restored)
    /// around every block and call.
    environment: EnvRef,

    /// Resolver output: variable-access expression → hop count.
    locals: HashMap<ExprId, usize>,

    /// Program output sink (`print` writes here).
    output: &'w mut dyn Write,

    reporter: Reporter,
}

impl<'w> Interpreter<'w> {
    pub fn new(output: &'w mut dyn Write, reporter: Reporter) -> Self {
        info!("Initializing interpreter");

        let globals = Environment::new();
        let environment = Rc::clone(&globals);

        Self {
            globals,
            environment,
            locals: HashMap::new(),
            output,
            reporter,
        }
    }

    /// The global environment, exposed so hosts can plant additional
    /// callables before a run.
    pub fn globals(&self) -> EnvRef {
        Rc::clone(&self.globals)
    }

    /// Install one native callable into the globals.
    pub fn define_native(&self, native: NativeFunction) {
        let name = native.name;
        let _ = self
            .globals
            .borrow_mut()
            .define(name, Value::Native(Rc::new(native)));
    }

    /// Resolver callback: `expr_id` refers to a binding `depth` hops up
    /// the scope chain.  Absence from the table means global.
    pub fn note_local(&mut self, expr_id: ExprId, depth: usize) {
        self.locals.insert(expr_id, depth);
    }

    /// Line-oriented write used by the `print` native.
    pub fn print_line(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.output, "{}", text).map_err(|e| format!("Output error: {}", e))
    }

    // ───────────────────────── program execution ────────────────────────

    /// Execute top-level statements.  The first fault halts the rest of
    /// the run and is reported once through the diagnostic sink.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        info!("Interpreting {} statement(s)", statements.len());

        for stmt in statements {
            if let Err(signal) = self.execute(stmt) {
                let error = match signal {
                    Signal::Fault(error) => error,

                    // Resolver guarantees these cannot reach here; if one
                    // does, that is a bug in this interpreter.
                    Signal::Return(_) | Signal::Break | Signal::Continue => RuntimeError::new(
                        Position::NONE,
                        "Internal error: control-flow signal escaped top-level code",
                    ),
                };

                self.reporter
                    .report(Diagnostic::new(error.position, error.message.clone()));

                return Err(error);
            }
        }

        info!("Interpretation completed");

        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }

            Stmt::Var(decl) => self.execute_var(decl),

            Stmt::Block(statements) => {
                let env = Environment::with_parent(Rc::clone(&self.environment));
                self.execute_block(statements, env)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body) {
                        Ok(()) => {}

                        // break unwinds exactly one enclosing loop
                        Err(Signal::Break) => break,

                        // continue re-checks the loop condition
                        Err(Signal::Continue) => continue,

                        Err(other) => return Err(other),
                    }
                }

                Ok(())
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Err(Signal::Return(value))
            }

            Stmt::Break(_) => Err(Signal::Break),

            Stmt::Continue(_) => Err(Signal::Continue),

            Stmt::Class { name, members } => self.execute_class(name, members),
        }
    }

    fn execute_var(&mut self, decl: &VarDecl) -> EvalResult<()> {
        let value = match &decl.initializer {
            // Named function declarations keep their binding name on the
            // function value.
            Some(Expr::Fn { params, body, .. }) => Value::Function(Rc::new(Function {
                name: Some(decl.name.lexeme.clone()),
                params: params.clone(),
                body: Rc::new(body.clone()),
                closure: Rc::clone(&self.environment),
                is_initializer: false,
            })),

            Some(expr) => self.evaluate(expr)?,

            None => Value::Nil,
        };

        debug!("Defining variable '{}'", decl.name.lexeme);

        // The resolver already rejects duplicates per scope; this guards
        // the same invariant at runtime.
        if !self
            .environment
            .borrow_mut()
            .define(&decl.name.lexeme, value)
        {
            return fault(
                decl.name.position,
                format!("Variable '{}' is already defined", decl.name.lexeme),
            );
        }

        Ok(())
    }

    fn execute_class(&mut self, name: &Token, members: &[VarDecl]) -> EvalResult<()> {
        let mut methods: HashMap<String, Rc<Function>> = HashMap::new();
        let mut fields: HashMap<String, Value> = HashMap::new();
        let mut statics: HashSet<String> = HashSet::new();

        for member in members {
            if member.is_static {
                statics.insert(member.name.lexeme.clone());
            }

            match &member.initializer {
                Some(Expr::Fn { params, body, .. }) => {
                    let function = Function {
                        name: Some(member.name.lexeme.clone()),
                        params: params.clone(),
                        body: Rc::new(body.clone()),
                        closure: Rc::clone(&self.environment),
                        is_initializer: member.name.lexeme == INITIALIZER,
                    };

                    methods.insert(member.name.lexeme.clone(), Rc::new(function));
                }

                Some(expr) => {
                    let value = self.evaluate(expr)?;
                    fields.insert(member.name.lexeme.clone(), value);
                }

                None => {
                    fields.insert(member.name.lexeme.clone(), Value::Nil);
                }
            }
        }

        let class = Class::new(name.lexeme.clone(), methods, fields, statics);

        if !self
            .environment
            .borrow_mut()
            .define(&name.lexeme, Value::Class(Rc::new(class)))
        {
            return fault(
                name.position,
                format!("Variable '{}' is already defined", name.lexeme),
            );
        }

        Ok(())
    }

    /// Run `statements` with `env` as the current scope, restoring the
    /// previous scope unconditionally — including when a fault or a
    /// control-flow signal is propagating out.
    pub fn execute_block(&mut self, statements: &[Stmt], env: EnvRef) -> EvalResult<()> {
        let previous = Rc::clone(&self.environment);
        self.environment = env;

        let mut result = Ok(());

        for stmt in statements {
            result = self.execute(stmt);

            if result.is_err() {
                break;
            }
        }

        self.environment = previous;

        result
    }

    // ───────────────────────── expression evaluation ────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::Str(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Ternary {
                condition,
                on_true,
                on_false,
            } => self.evaluate_ternary(condition, on_true, on_false),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left_val = self.evaluate(left)?;

                // `or` keeps a truthy left, `and` keeps a falsy left;
                // otherwise the right operand decides.
                let short_circuit = match operator.token_type {
                    TokenType::OR => left_val.is_truthy(),
                    _ => !left_val.is_truthy(),
                };

                if short_circuit {
                    Ok(left_val)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up(*id, &name.lexeme, name.position),

            Expr::SelfRef { id, keyword } => self.look_up(*id, &keyword.lexeme, keyword.position),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                let assigned = match self.locals.get(id) {
                    Some(&depth) => Environment::assign_at(
                        &self.environment,
                        depth,
                        &name.lexeme,
                        value.clone(),
                        name.position,
                    ),
                    None => self
                        .globals
                        .borrow_mut()
                        .assign(&name.lexeme, value.clone(), name.position),
                };

                match assigned {
                    Ok(()) => Ok(value),
                    Err((position, message)) => fault(position, message),
                }
            }

            Expr::Fn {
                params,
                body,
                ..
            } => Ok(Value::Function(Rc::new(Function {
                name: None,
                params: params.clone(),
                body: Rc::new(body.clone()),
                closure: Rc::clone(&self.environment),
                is_initializer: false,
            }))),

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee_val = self.evaluate(callee)?;

                // left-to-right, depth-first argument evaluation
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                self.invoke_callable(callee_val, args, paren.position)
            }

            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;

                let result = match &object {
                    Value::Instance(instance) => Instance::get(instance, name),
                    Value::Class(class) => Class::get(class, name),
                    _ => return fault(name.position, "Only instances have properties"),
                };

                result.or_else(|(position, message)| fault(position, message))
            }

            Expr::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(object)?;
                let value = self.evaluate(value)?;

                let result = match &object {
                    Value::Instance(instance) => Instance::set(instance, name, value.clone()),
                    Value::Class(class) => Class::set(class, name, value.clone()),
                    _ => return fault(name.position, "Only instances have properties"),
                };

                match result {
                    Ok(()) => Ok(value),
                    Err((position, message)) => fault(position, message),
                }
            }
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> EvalResult<Value> {
        let right_val = self.evaluate(right)?;

        match operator.token_type {
            TokenType::BANG => Ok(Value::Bool(!right_val.is_truthy())),

            TokenType::MINUS => match right_val {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => fault(operator.position, "Operand must be a number"),
            },

            // unary '+' is a pass-through
            TokenType::PLUS => Ok(right_val),

            _ => fault(operator.position, "Unknown unary operator"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> EvalResult<Value> {
        // comma: run the left for its side effects, yield the right
        if operator.token_type == TokenType::COMMA {
            self.evaluate(left)?;
            return self.evaluate(right);
        }

        let left_val = self.evaluate(left)?;
        let right_val = self.evaluate(right)?;

        if operator.token_type == TokenType::PLUS {
            return match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
                _ => fault(
                    operator.position,
                    "Operands must be two numbers or two strings",
                ),
            };
        }

        // every remaining operator — including equality — is numeric
        let (a, b) = match (left_val, right_val) {
            (Value::Number(a), Value::Number(b)) => (a, b),
            _ => return fault(operator.position, "Operands must be numbers"),
        };

        match operator.token_type {
            TokenType::MINUS => Ok(Value::Number(a - b)),
            TokenType::STAR => Ok(Value::Number(a * b)),

            // IEEE semantics throughout: x/0 is ±inf, 0/0 is NaN
            TokenType::SLASH => Ok(Value::Number(a / b)),

            TokenType::GREATER => Ok(Value::Bool(a > b)),
            TokenType::GREATER_EQUAL => Ok(Value::Bool(a >= b)),
            TokenType::LESS => Ok(Value::Bool(a < b)),
            TokenType::LESS_EQUAL => Ok(Value::Bool(a <= b)),

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(a == b)),
            TokenType::BANG_EQUAL => Ok(Value::Bool(a != b)),

            _ => fault(operator.position, "Unknown binary operator"),
        }
    }

    fn evaluate_ternary(
        &mut self,
        condition: &Expr,
        on_true: &Expr,
        on_false: &Expr,
    ) -> EvalResult<Value> {
        let cond = self.evaluate(condition)?;

        match cond {
            Value::Bool(_) | Value::Number(_) => {
                if cond.is_truthy() {
                    self.evaluate(on_true)
                } else {
                    self.evaluate(on_false)
                }
            }

            _ => fault(
                condition.position(),
                "Ternary condition must be a boolean or a number",
            ),
        }
    }

    fn look_up(&self, id: ExprId, name: &str, position: Position) -> EvalResult<Value> {
        let result = match self.locals.get(&id) {
            Some(&depth) => Environment::get_at(&self.environment, depth, name, position),
            None => self.globals.borrow().get(name, position),
        };

        result.or_else(|(position, message)| fault(position, message))
    }

    fn invoke_callable(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        position: Position,
    ) -> EvalResult<Value> {
        let callable: &dyn Callable = match &callee {
            Value::Native(native) => native,
            Value::Function(function) => function,
            Value::Class(class) => class,
            _ => return fault(position, "Can only call functions and classes"),
        };

        // exact-arity contract, checked before the body runs
        if args.len() != callable.arity() {
            return fault(
                position,
                format!(
                    "Expected {} arguments but got {}",
                    callable.arity(),
                    args.len()
                ),
            );
        }

        debug!("Invoking callable {}", callee);

        callable.call(self, args, position)
    }
}
