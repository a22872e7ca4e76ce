/// Dispatch of binary operations.
///
/// Evaluates the operands in order and routes the operator to its handler.
/// The logical connectives are dispatched before their right operand is
/// evaluated so they can short-circuit.
pub mod core;

/// Arithmetic on numbers and concatenation of strings.
pub mod scalar;

/// Ordering and equality comparisons.
pub mod comparison;

/// `oraz` and `lub`.
pub mod logic;
