use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::Call,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow, MAX_CALL_DEPTH},
            function::builtin,
        },
        value::core::{Builtin, Callable, UserFunction, Value},
    },
};

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name, under which the builtin is bound in the global frame,
/// - the parameter names, whose count is the arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces `BUILTIN_TABLE`, the static table bound into every run.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every builtin, in the order they are bound into the global frame.
        pub static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "sufit"   => { params: ["liczba"],  func: builtin::sufit },
    "podloga" => { params: ["liczba"],  func: builtin::podloga },
    "dl"      => { params: ["tablica"], func: builtin::dl },
    "napis"   => { params: ["liczba"],  func: builtin::napis },
}

impl Context {
    /// Evaluates a call.
    ///
    /// The callee is looked up like any variable. Arguments are evaluated in
    /// the caller's frame, left to right, after the arity check.
    ///
    /// # Returns
    /// The returned value, or `None` for a user function that finished
    /// without `zwróć` or with a bare `zwróć`.
    ///
    /// # Errors
    /// - `Nieznana zmienna: {f}.` at the callee name.
    /// - `Zmienna {f} nie jest funkcją.` and the arity mismatch at the `(`.
    /// - A builtin's complaint at the callee name.
    /// - `Przepełnienie stosu!` at the `(` when the call would exceed
    ///   [`MAX_CALL_DEPTH`] frames.
    pub(crate) fn call(&mut self, call: &Call) -> EvalResult<Option<Value>> {
        let callee = &call.callee;

        let value = self.lookup(&callee.name).cloned().ok_or_else(|| {
                        RuntimeError::new(format!("Nieznana zmienna: {}.", callee.name),
                                          callee.position)
                    })?;

        let Value::Function(callable) = value else {
            return Err(RuntimeError::new(format!("Zmienna {} nie jest funkcją.", callee.name),
                                         call.position));
        };

        if callable.arity() != call.arguments.len() {
            return Err(RuntimeError::new(format!("Funkcja {} przyjmuje liczbę argumentów: {}, \
                                                  otrzymała liczbę argumentów: {}.",
                                                 callee.name,
                                                 callable.arity(),
                                                 call.arguments.len()),
                                         call.position));
        }

        match callable {
            Callable::Builtin(builtin) => self.call_builtin(builtin, call).map(Some),
            Callable::User(function) => self.call_user(&function, call),
        }
    }

    /// Error for a call whose missing result was needed as a value.
    pub(crate) fn nothing_returned(call: &Call) -> RuntimeError {
        RuntimeError::new(format!("Funkcja {} nic nie zwraca.", call.callee.name),
                          call.position)
    }

    fn evaluate_arguments(&mut self, call: &Call) -> EvalResult<Vec<Value>> {
        call.arguments.iter().map(|argument| self.eval_expr(argument)).collect()
    }

    fn call_builtin(&mut self, builtin: &Builtin, call: &Call) -> EvalResult<Value> {
        let arguments = self.evaluate_arguments(call)?;

        (builtin.func)(&arguments).map_err(|error| {
                                      RuntimeError::new(error.message, call.callee.position)
                                  })
    }

    /// Runs a user function in a new frame holding only its parameters.
    ///
    /// The frame is popped whether the body finishes, returns or fails.
    fn call_user(&mut self, function: &UserFunction, call: &Call) -> EvalResult<Option<Value>> {
        let arguments = self.evaluate_arguments(call)?;
        let frame = function.params
                            .iter()
                            .cloned()
                            .zip(arguments)
                            .collect::<HashMap<_, _>>();

        self.call_stack.push(frame);
        if self.call_stack.len() > MAX_CALL_DEPTH {
            self.call_stack.pop();
            return Err(RuntimeError::new("Przepełnienie stosu!", call.position));
        }

        trace!(function = %function.name, depth = self.call_stack.len(), "calling function");

        let flow = self.exec_block(&function.body);
        self.call_stack.pop();

        Ok(match flow? {
               Flow::Return(value) => value,
               Flow::Continue => None,
           })
    }
}
