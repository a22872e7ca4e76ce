//! # pseudokod
//!
//! pseudokod is an interpreter for a small educational pseudocode language
//! with Polish keywords, written in Rust.
//! It tokenizes, parses and evaluates programs with variables, loops,
//! conditionals, functions, arrays and strings, and reports every error with
//! its line and column.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{any::Any, thread};

use tracing::error;

use crate::interpreter::evaluator::core::Context;

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of a program as a tree. The AST is built
/// by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source positions to nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines the errors raised while lexing, parsing or evaluating
/// a program, and the `Error` type that distinguishes language diagnostics
/// from internal failures.
///
/// # Responsibilities
/// - Defines syntax, runtime and builtin errors with their messages.
/// - Attaches zero-based positions, rendered 1-based for users.
/// - Keeps the output produced before a runtime error.
pub mod error;
/// Runs programs for a host.
///
/// This module sits at the boundary between the interpreter and whatever
/// displays its results: it runs a request on a worker thread under a time
/// budget and turns the outcome into display-ready text.
///
/// # Responsibilities
/// - Enforces a wall-clock timeout without any help from the interpreter.
/// - Formats output and error reports.
/// - Parses starting bindings typed in as text.
pub mod harness;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for parsing and evaluating programs.
pub mod interpreter;
/// General utilities for number formatting and index conversion.
pub mod util;

pub use error::Error;
pub use interpreter::{
    evaluator::core::{Bindings, Options},
    parser::core::parse,
    value::{core::InitialValue, printed::Printed},
};

/// Stack size of every thread a program runs on.
///
/// Deep recursion in a program becomes deep recursion in the evaluator;
/// this is enough for the call depth limit to be reached first.
pub const STACK_SIZE: usize = 256 * 1024 * 1024;

/// Parses and runs a program, returning everything it printed.
///
/// The program runs on a scoped thread with a [`STACK_SIZE`] stack, and this
/// function blocks until it finishes. There is no timeout; see
/// [`harness::Worker`] for that.
///
/// # Errors
/// - [`Error::Syntax`] if the source does not parse.
/// - [`Error::Runtime`] if evaluation fails; it carries the partial output.
/// - [`Error::Internal`] if the interpreter itself panics or the thread
///   cannot be started.
///
/// # Examples
/// ```
/// use pseudokod::{Bindings, InitialValue, Options, Printed, execute};
///
/// let mut bindings = Bindings::new();
/// bindings.insert("n".to_string(), InitialValue::Number(3.0));
///
/// let source = "dla i = 1, 2, ..., n wykonuj\n    wypisz i * i";
/// let output = execute(source, &bindings, Options::default()).unwrap();
/// assert_eq!(output,
///            vec![Printed::Number(1.0), Printed::Number(4.0), Printed::Number(9.0)]);
///
/// let error = execute("wypisz x", &Bindings::new(), Options::default()).unwrap_err();
/// assert_eq!(error.to_string(), "Wiersz 1, kolumna 8: Nieznana zmienna: x.");
/// ```
pub fn execute(source: &str, bindings: &Bindings, options: Options) -> Result<Vec<Printed>, Error> {
    thread::scope(|scope| {
        let spawned = thread::Builder::new().name("pseudokod".to_string())
                                            .stack_size(STACK_SIZE)
                                            .spawn_scoped(scope, || {
                                                run_program(source, bindings, options)
                                            });

        match spawned {
            Ok(handle) => handle.join().unwrap_or_else(|payload| Err(panic_error(&*payload))),
            Err(e) => Err(internal_error(format!("cannot spawn interpreter thread: {e}"))),
        }
    })
}

/// Parses and runs a program on the current thread.
///
/// Unlike [`execute`] this uses whatever stack the caller has, so deeply
/// recursive programs may exhaust it. It is meant for threads that were
/// started with [`STACK_SIZE`].
pub fn run_program(source: &str, bindings: &Bindings, options: Options) -> Result<Vec<Printed>, Error> {
    let program = parse(source)?;
    let output = Context::new(bindings, options).run(&program)?;
    Ok(output)
}

/// Logs an internal failure and wraps it.
pub(crate) fn internal_error(detail: String) -> Error {
    error!(%detail, "internal interpreter error");
    Error::Internal(detail)
}

/// Turns the payload of a panicked interpreter thread into an internal error.
pub(crate) fn panic_error(payload: &(dyn Any + Send)) -> Error {
    let detail = payload.downcast_ref::<&str>()
                        .map(ToString::to_string)
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "interpreter thread panicked".to_string());

    internal_error(detail)
}
