/// Parser state and token handling.
///
/// Holds the `Parser` struct (lexer, one-token lookahead and the counters
/// that track nesting), the `consume` primitive every production is built on,
/// and the `parse` entry point.
pub mod core;

/// Statement productions.
///
/// Assignments, calls, loops, conditionals, function definitions, returns and
/// prints.
pub mod statement;

/// Indented blocks.
///
/// Collects the lines of a block by counting indentation tokens and rewinds
/// the lexer when a line belongs to an enclosing block.
pub mod block;

/// Expression flattening.
///
/// Gathers the operands, operators, parentheses, calls and index brackets of
/// one expression into a flat list.
pub mod expression;

/// Grouping and precedence reduction.
///
/// Turns the flat list produced by `expression` into a tree, first by
/// matching parentheses and then by folding operators tier by tier.
pub mod precedence;
