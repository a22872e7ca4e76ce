use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{Block, Expr, Literal, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::BUILTIN_TABLE,
        value::{
            core::{Callable, InitialValue, UserFunction, Value},
            printed::Printed,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Deepest call stack allowed, counting the global frame.
pub const MAX_CALL_DEPTH: usize = 999;

/// Starting bindings supplied by the host, by variable name.
pub type Bindings = HashMap<String, InitialValue>;

/// Index configuration of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// First valid array index.
    pub array_origin:  i64,
    /// First valid string index.
    pub string_origin: i64,
}

impl Default for Options {
    fn default() -> Self {
        Self { array_origin:  1,
               string_origin: 1, }
    }
}

impl Options {
    /// Options that index both arrays and strings from 0.
    #[must_use]
    pub const fn zero_based() -> Self {
        Self { array_origin:  0,
               string_origin: 0, }
    }
}

/// How a statement finished.
#[derive(Debug)]
pub enum Flow {
    /// Carry on with the next statement.
    Continue,
    /// A `zwróć` ran; unwind to the enclosing call with its value, if any.
    Return(Option<Value>),
}

/// Stores the state of a single run.
///
/// A context is created for one program and consumed by [`Context::run`], so
/// separate runs never share a call stack or an output buffer.
///
/// ## Scoping
///
/// The call stack is a flat list of frames searched from the innermost one
/// outwards. A function therefore sees, and may overwrite, variables of every
/// caller below it, not only globals. Frame 0 holds the host bindings and the
/// builtins.
pub struct Context {
    pub(crate) call_stack: Vec<HashMap<String, Value>>,
    pub(crate) output:     Vec<Printed>,
    pub(crate) options:    Options,
}

impl Context {
    /// Creates a context whose global frame holds `bindings` and the
    /// builtins. A binding named like a builtin is shadowed by the builtin.
    #[must_use]
    pub fn new(bindings: &Bindings, options: Options) -> Self {
        let mut globals = bindings.iter()
                                  .map(|(name, value)| (name.clone(), Value::from(value.clone())))
                                  .collect::<HashMap<_, _>>();

        for builtin in BUILTIN_TABLE {
            globals.insert(builtin.name.to_string(), Value::Function(Callable::Builtin(builtin)));
        }

        Self { call_stack: vec![globals],
               output: Vec::new(),
               options }
    }

    /// Runs a parsed program and returns everything it printed.
    ///
    /// # Errors
    /// The first [`RuntimeError`], carrying the output produced before it.
    ///
    /// # Example
    /// ```
    /// use pseudokod::{
    ///     interpreter::{evaluator::core::{Bindings, Context, Options},
    ///                   value::printed::Printed},
    ///     parse,
    /// };
    ///
    /// let program = parse("wypisz 2 * 21").unwrap();
    /// let output = Context::new(&Bindings::new(), Options::default()).run(&program).unwrap();
    ///
    /// assert_eq!(output, vec![Printed::Number(42.0)]);
    /// ```
    pub fn run(mut self, program: &Program) -> EvalResult<Vec<Printed>> {
        debug!(array_origin = self.options.array_origin,
               string_origin = self.options.string_origin,
               "running program");

        for statement in &program.body {
            if let Err(error) = self.exec_statement(statement) {
                debug!(printed = self.output.len(), "run failed");
                return Err(error.with_output(self.output));
            }
        }

        debug!(printed = self.output.len(), "run finished");
        Ok(self.output)
    }

    /// Executes the statements of a block until one of them returns.
    pub(crate) fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        for statement in &block.statements {
            if let Flow::Return(value) = self.exec_statement(statement)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Continue)
    }

    /// Executes a single statement.
    pub(crate) fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Assignment { target, value } => self.exec_assignment(target, value)?,
            Statement::Call(call) => {
                self.call(call)?;
            },
            Statement::While { condition,
                               body,
                               position, } => return self.exec_while(condition, body, *position),
            Statement::For { variable,
                             start,
                             second,
                             end,
                             body,
                             position, } => {
                return self.exec_for(variable, [start, second, end], body, *position);
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                let condition_value = self.eval_expr(condition)?;
                let Value::Bool(holds) = condition_value else {
                    return Err(RuntimeError::new("Wyrażenie bloku JEŻELI musi ewaluować do \
                                                  wartości PRAWDA/FAŁSZ.",
                                                 condition.position()));
                };

                if holds {
                    return self.exec_block(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec_block(else_branch);
                }
            },
            Statement::Function(def) => {
                let function = UserFunction { name:   def.name.name.clone(),
                                              params: def.params
                                                         .iter()
                                                         .map(|param| param.name.clone())
                                                         .collect(),
                                              body:   def.body.clone(), };
                self.define(&def.name.name, Value::Function(Callable::User(function.into())));
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_optional(expr)?,
                    None => None,
                };
                return Ok(Flow::Return(value));
            },
            Statement::Print { value, .. } => {
                let printed = self.eval_expr(value)?.to_printed();
                self.output.push(printed);
            },
        }

        Ok(Flow::Continue)
    }

    /// Evaluates an expression that must produce a value.
    ///
    /// # Errors
    /// Besides the errors of the individual operations, `Funkcja {f} nic nie
    /// zwraca.` when a call inside the expression returns nothing.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                Literal::Number(n) => Value::Number(*n),
                Literal::Text(s) => Value::Text(s.clone()),
                Literal::Bool(b) => Value::Bool(*b),
            }),
            Expr::Variable(identifier) => {
                self.lookup(&identifier.name).cloned().ok_or_else(|| {
                    RuntimeError::new(format!("Nieznana zmienna: {}.", identifier.name),
                                      identifier.position)
                })
            },
            Expr::Unary { op,
                          operand,
                          position, } => self.eval_unary(*op, operand, *position),
            Expr::Binary { left,
                           op,
                           right,
                           position, } => self.eval_binary(left, *op, right, *position),
            Expr::Index { target,
                          index,
                          position, } => self.eval_index(target, index, *position),
            Expr::Call(call) => self.call(call)?.ok_or_else(|| Self::nothing_returned(call)),
        }
    }

    /// Evaluates an expression that may legitimately produce nothing: a call
    /// to a function that finished without a value.
    pub(crate) fn eval_optional(&mut self, expr: &Expr) -> EvalResult<Option<Value>> {
        match expr {
            Expr::Call(call) => self.call(call),
            other => self.eval_expr(other).map(Some),
        }
    }

    /// Finds a variable, searching frames from the innermost outwards.
    pub(crate) fn lookup(&self, name: &str) -> Option<&Value> {
        self.call_stack.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Writes a variable into the innermost frame that already holds it, or
    /// creates it in the top frame.
    pub(crate) fn assign(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.call_stack
                                .iter_mut()
                                .rev()
                                .find_map(|frame| frame.get_mut(name))
        {
            *slot = value;
            return;
        }

        self.define(name, value);
    }

    /// Binds a name in the top frame, whether or not an outer frame has it.
    pub(crate) fn define(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.call_stack.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }
}
