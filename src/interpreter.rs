/// The evaluator module executes a parsed program.
///
/// The evaluator walks the AST statement by statement against a call stack of
/// variable frames, checks operand types at runtime and collects everything
/// the program prints.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements in source order.
/// - Manages the call stack, builtins and user-defined functions.
/// - Reports runtime errors with the position of the failing construct.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the source line by line and produces tokens on demand:
/// indentation, logical newlines, punctuation, keywords, literals, operators
/// and identifiers, each with its position.
///
/// # Responsibilities
/// - Converts the source into position-tagged tokens, one at a time.
/// - Tracks indentation and logical line boundaries.
/// - Reports unknown characters and unterminated strings.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser pulls tokens from the lexer with a single token of lookahead
/// and builds statements with recursive descent. Expressions are parsed in
/// three passes: flattening, grouping by parentheses and precedence
/// reduction.
///
/// # Responsibilities
/// - Converts tokens into statements, blocks and expressions.
/// - Validates grammar and indentation, reporting errors with positions.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Numbers, strings, booleans, shared arrays and callables, plus the owned
/// snapshots recorded by `wypisz` and the thread-safe form of host bindings.
pub mod value;
