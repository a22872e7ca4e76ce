/// Builtin function implementations.
///
/// The four natives bound in every run: `sufit`, `podloga`, `dl` and
/// `napis`.
pub mod builtin;

/// Call dispatch.
///
/// Declares the builtin table and evaluates calls to builtins and to user
/// defined functions, including the call depth limit.
pub mod core;
