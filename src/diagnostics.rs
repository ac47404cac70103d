//! Diagnostic sink shared by every pipeline stage.
//!
//! The scanner, parser, resolver, and interpreter each hold a [`Reporter`]
//! handle and push [`Diagnostic`]s into it instead of printing or aborting.
//! The host (CLI, tests) owns the original handle, decides how to render
//! the collected diagnostics, and queries [`Reporter::has_error`] to gate
//! execution of a program that failed to scan/parse/resolve cleanly.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::RillError;
use crate::token::Position;

/// One reported problem: a position, an optional offending lexeme, and a
/// message.  Rendered as `[line L; offset C] Error at 'lexeme': message`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub position: Position,
    pub where_text: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new<S: Into<String>>(position: Position, message: S) -> Self {
        Diagnostic {
            position,
            where_text: None,
            message: message.into(),
        }
    }

    /// Attach the offending lexeme.
    pub fn at_lexeme<S: Into<String>>(mut self, lexeme: S) -> Self {
        self.where_text = Some(lexeme.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.position.is_none() {
            write!(f, "{} ", self.position)?;
        }

        match &self.where_text {
            Some(lexeme) => write!(f, "Error at '{}': {}", lexeme, self.message),
            None => write!(f, "Error: {}", self.message),
        }
    }
}

impl From<&RillError> for Diagnostic {
    fn from(err: &RillError) -> Self {
        let diag = Diagnostic::new(err.position(), err_message(err));

        match err {
            RillError::Parse { lexeme, .. } if !lexeme.is_empty() => diag.at_lexeme(lexeme),
            _ => diag,
        }
    }
}

fn err_message(err: &RillError) -> String {
    match err {
        RillError::Lex { message, .. }
        | RillError::Parse { message, .. }
        | RillError::Resolve { message, .. }
        | RillError::Runtime { message, .. } => message.clone(),
        RillError::Io(e) => e.to_string(),
    }
}

#[derive(Debug, Default)]
struct State {
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
}

/// Cloneable handle to a shared diagnostic buffer.
///
/// Every stage constructor takes a `Reporter` by value; clones all point at
/// the same buffer, so the host observes the union of what the stages saw.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    state: Rc<RefCell<State>>,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    /// Record a diagnostic.  Never aborts the reporting stage.
    pub fn report(&self, diagnostic: Diagnostic) {
        debug!("Diagnostic reported: {}", diagnostic);

        let mut state = self.state.borrow_mut();
        state.had_error = true;
        state.diagnostics.push(diagnostic);
    }

    /// Convenience: report a structured error as a diagnostic.
    pub fn report_error(&self, err: &RillError) {
        self.report(Diagnostic::from(err));
    }

    /// Has anything been reported since construction or the last `reset`?
    pub fn has_error(&self) -> bool {
        self.state.borrow().had_error
    }

    /// Clear the buffer and the error flag.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.had_error = false;
        state.diagnostics.clear();
    }

    /// Drain the collected diagnostics, leaving the error flag untouched.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.state.borrow_mut().diagnostics)
    }

    /// Number of diagnostics currently buffered.
    pub fn len(&self) -> usize {
        self.state.borrow().diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().diagnostics.is_empty()
    }
}
