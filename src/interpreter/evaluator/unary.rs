use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
    util::num::index_to_slot,
};

impl Context {
    /// Evaluates `nie` or a unary minus.
    ///
    /// `nie` negates truthiness and accepts any value. Unary minus requires a
    /// number.
    pub(crate) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Expr,
                             position: Position)
                             -> EvalResult<Value> {
        let value = self.eval_expr(operand)?;

        match op {
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::new("Operacje arytmetyczne można wykonywać tylko na \
                                            liczbach.",
                                           position)),
            },
        }
    }

    /// Reads one element of an array or one character of a string.
    ///
    /// The index is evaluated before the indexed value. It is shifted by the
    /// origin configured for the value's kind.
    ///
    /// # Errors
    /// - `Zmienna {x} nie jest tablicą ani napisem.` at the `[`.
    /// - `Indeks {i} poza długością tablicy {x}.` one column after the `[`
    ///   when the index is not an integer within range.
    pub(crate) fn eval_index(&mut self,
                             target: &Expr,
                             index: &Expr,
                             position: Position)
                             -> EvalResult<Value> {
        let index_value = self.eval_expr(index)?;
        let target_value = self.eval_expr(target)?;

        let out_of_range = || {
            RuntimeError::new(format!("Indeks {index_value} poza długością tablicy {}.",
                                      target.subject()),
                              Position::new(position.line, position.column + 1))
        };
        let number = if let Value::Number(n) = index_value { Some(n) } else { None };
        let slot = |origin| number.and_then(|n| index_to_slot(n, origin));

        match &target_value {
            Value::Array(items) => slot(self.options.array_origin).and_then(|i| items.borrow().get(i).cloned())
                                                                  .ok_or_else(out_of_range),
            Value::Text(text) => slot(self.options.string_origin).and_then(|i| text.chars().nth(i))
                                                                 .map(|c| Value::Text(c.to_string()))
                                                                 .ok_or_else(out_of_range),
            _ => Err(RuntimeError::new(format!("Zmienna {} nie jest tablicą ani napisem.",
                                               target.subject()),
                                       position)),
        }
    }
}
