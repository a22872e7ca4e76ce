use thiserror::Error;

use crate::interpreter::lexer::Position;

/// A lexical or grammatical error in the source text.
///
/// Displays as `Wiersz {line}, kolumna {column}: {message}` with a 1-based
/// line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Wiersz {}, kolumna {}: {message}", .position.line + 1, .position.column + 1)]
pub struct SyntaxError {
    /// What went wrong.
    pub message:  String,
    /// Zero-based position of the offending token.
    pub position: Position,
}

impl SyntaxError {
    /// Creates a syntax error at `position`.
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self { message: message.into(),
               position }
    }
}
