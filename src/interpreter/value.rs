/// Runtime values.
///
/// Defines `Value`, the dynamically typed value every expression evaluates
/// to, together with callables (builtins and user functions) and
/// `InitialValue`, the thread-safe form in which the host supplies starting
/// bindings.
pub mod core;
/// Printed output.
///
/// Defines `Printed`, an owned snapshot of a value taken when `wypisz` runs.
/// Later mutation of an array never changes output that was already
/// produced.
pub mod printed;
