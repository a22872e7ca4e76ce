/// Syntax errors.
///
/// Raised by the lexer and the parser for malformed or incomplete source.
/// A syntax error always carries the position of the offending token (or of
/// the last consumed character when the input ended early).
pub mod syntax_error;
/// Runtime errors.
///
/// Raised while evaluating a program: type mismatches, unknown variables,
/// out-of-range indices, wrong arities, stack overflow and missing return
/// values. Runtime errors also carry everything printed before the failure.
pub mod runtime_error;

use thiserror::Error;

pub use runtime_error::{BuiltinError, RuntimeError};
pub use syntax_error::SyntaxError;

/// Message shown to the user in place of any internal failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Ups, wystąpił nieoczekiwany błąd wewnętrzny.";

/// Any failure produced by running a program.
///
/// `Syntax` and `Runtime` are language diagnostics and render with their
/// 1-based position. `Internal` signals a defect in the interpreter itself;
/// its detail is kept for `Debug` output and logging but never displayed as
/// if it were a diagnostic.
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be tokenized or parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The interpreter reached a state it considers impossible.
    #[error("Ups, wystąpił nieoczekiwany błąd wewnętrzny.")]
    Internal(String),
}

impl Error {
    /// Returns the 1-based line of a language diagnostic.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax(e) => Some(e.position.line + 1),
            Self::Runtime(e) => Some(e.position.line + 1),
            Self::Internal(_) => None,
        }
    }

    /// Returns the 1-based column of a language diagnostic.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::Syntax(e) => Some(e.position.column + 1),
            Self::Runtime(e) => Some(e.position.column + 1),
            Self::Internal(_) => None,
        }
    }

    /// Returns the bare message of a language diagnostic, without the
    /// position prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax(e) => &e.message,
            Self::Runtime(e) => &e.message,
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Returns `true` for errors raised by the interpreter itself rather than
    /// by the program.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
