use thiserror::Error;

use crate::interpreter::{lexer::Position, value::printed::Printed};

/// A failure while evaluating a program.
///
/// Besides the position and message, a runtime error carries the output the
/// program produced before it failed, so the host can still show it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Wiersz {}, kolumna {}: {message}", .position.line + 1, .position.column + 1)]
pub struct RuntimeError {
    /// What went wrong.
    pub message:  String,
    /// Zero-based position of the construct that failed.
    pub position: Position,
    /// Everything printed before the failure, in order.
    pub output:   Vec<Printed>,
}

impl RuntimeError {
    /// Creates a runtime error at `position` with no output attached yet.
    ///
    /// The evaluation context attaches the output produced so far when the
    /// error leaves [`Context::run`](crate::interpreter::evaluator::core::Context::run).
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self { message: message.into(),
               position,
               output: Vec::new() }
    }

    /// Replaces the attached output.
    #[must_use]
    pub fn with_output(mut self, output: Vec<Printed>) -> Self {
        self.output = output;
        self
    }
}

/// A complaint raised inside a builtin function.
///
/// Builtins know nothing about positions; the call site turns this into a
/// [`RuntimeError`] located at the callee name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BuiltinError {
    /// What the builtin expected.
    pub message: String,
}

impl BuiltinError {
    /// Creates a builtin error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
