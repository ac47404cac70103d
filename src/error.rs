//! Centralised error hierarchy for the **Rill interpreter**.
//!
//! All subsystems (scanner, parser, resolver, runtime, CLI) convert their
//! internal failure modes into one of the variants defined here.  This
//! enables a uniform `Result<T>` alias throughout the crate and ergonomic
//! inter-operation with `anyhow`, while still preserving rich diagnostic
//! detail.
//!
//! The module **does not** print diagnostics itself — that is the job of
//! the [`crate::diagnostics::Reporter`] each stage is handed.

use std::io;
use thiserror::Error;

use crate::token::Position;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RillError {
    /// Lexical (scanner) error with source position information.
    #[error("{position} Error: {message}")]
    Lex {
        /// Human-readable description.
        message: String,

        /// Coordinate where the error occurred.
        position: Position,
    },

    /// Syntactic (parser) error.
    #[error("{position} Error at '{lexeme}': {message}")]
    Parse {
        message: String,
        lexeme: String,
        position: Position,
    },

    /// Static-analysis or resolution failure (e.g. early-binding errors).
    #[error("{position} Error: {message}")]
    Resolve { message: String, position: Position },

    /// Runtime evaluation fault.
    #[error("{position} Runtime error: {message}")]
    Runtime { message: String, position: Position },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RillError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(position: Position, msg: S) -> Self {
        RillError::Lex {
            message: msg.into(),
            position,
        }
    }

    /// Helper constructor for the **parser**.  `lexeme` is the offending
    /// token's text, quoted in the rendered diagnostic.
    pub fn parse<S: Into<String>, L: Into<String>>(position: Position, lexeme: L, msg: S) -> Self {
        RillError::Parse {
            message: msg.into(),
            lexeme: lexeme.into(),
            position,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(position: Position, msg: S) -> Self {
        RillError::Resolve {
            message: msg.into(),
            position,
        }
    }

    /// Helper constructor for the **evaluator**.
    pub fn runtime<S: Into<String>>(position: Position, msg: S) -> Self {
        RillError::Runtime {
            message: msg.into(),
            position,
        }
    }

    /// The source coordinate this error points at, if it has one.
    pub fn position(&self) -> Position {
        match self {
            RillError::Lex { position, .. }
            | RillError::Parse { position, .. }
            | RillError::Resolve { position, .. }
            | RillError::Runtime { position, .. } => *position,
            RillError::Io(_) => Position::NONE,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RillError>;
