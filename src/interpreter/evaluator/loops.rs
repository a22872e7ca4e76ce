use crate::{
    ast::{Block, Expr, Identifier},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Executes `dopóki condition wykonuj`.
    ///
    /// The condition is evaluated before every iteration and must be a
    /// boolean. A `zwróć` inside the body stops the loop and propagates.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &Block,
                             position: Position)
                             -> EvalResult<Flow> {
        loop {
            match self.eval_expr(condition)? {
                Value::Bool(true) => {},
                Value::Bool(false) => return Ok(Flow::Continue),
                _ => {
                    return Err(RuntimeError::new("Wyrażenie pętli DOPÓKI musi ewaluować do \
                                                  wartości PRAWDA/FAŁSZ.",
                                                 position));
                },
            }

            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
        }
    }

    /// Executes `dla variable = start, second, ..., end wykonuj`.
    ///
    /// The three bounds are evaluated once, up front. The step is
    /// `second - start`: a positive step counts up while the variable is at
    /// most `end`, a negative one counts down while it is at least `end`, and
    /// a zero step runs nothing. The variable is written into the top frame
    /// before each iteration, so it keeps its last value after the loop.
    ///
    /// # Errors
    /// `Operacje arytmetyczne można wykonywać tylko na liczbach.` at `dla`
    /// when a bound is not a number.
    pub(crate) fn exec_for(&mut self,
                           variable: &Identifier,
                           bounds: [&Expr; 3],
                           body: &Block,
                           position: Position)
                           -> EvalResult<Flow> {
        let mut numbers = [0.0; 3];
        for (number, bound) in numbers.iter_mut().zip(bounds) {
            let Value::Number(n) = self.eval_expr(bound)? else {
                return Err(RuntimeError::new("Operacje arytmetyczne można wykonywać tylko na \
                                              liczbach.",
                                             position));
            };
            *number = n;
        }

        let [start, second, end] = numbers;
        let step = second - start;
        let within = |i: f64| {
            if step > 0.0 {
                i <= end
            } else if step < 0.0 {
                i >= end
            } else {
                false
            }
        };

        let mut i = start;
        while within(i) {
            self.define(&variable.name, Value::Number(i));

            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }

            i += step;
        }

        Ok(Flow::Continue)
    }
}
