/// Core evaluation logic and context management.
///
/// Contains the run context (call stack, output and index options), the
/// statement and expression dispatch, and variable lookup.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons and the
/// short-circuiting logical connectives.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements `nie`, unary minus and reading an element by index.
pub mod unary;

/// Assignment to variables, array elements and string characters.
pub mod assignment;

/// Evaluation of `dla` and `dopóki` loops.
pub mod loops;

/// Function evaluation.
///
/// Handles builtin and user-defined function calls, argument checking, and
/// return value computation.
pub mod function;
