use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

const LOGIC_TYPE_ERROR: &str =
    "Spójników logicznych można używać jedynie na wartościach PRAWDA/FAŁSZ.";

impl Context {
    /// Evaluates `oraz` or `lub` with short-circuiting.
    ///
    /// `oraz` yields `FAŁSZ` as soon as the left operand is `FAŁSZ`, and
    /// `lub` yields `PRAWDA` as soon as it is `PRAWDA`; the right operand is
    /// then never evaluated. Otherwise both operands must be booleans.
    pub(crate) fn eval_logic(&mut self,
                             op: BinaryOperator,
                             left: &Value,
                             right: &Expr,
                             position: Position)
                             -> EvalResult<Value> {
        match (op, left) {
            (BinaryOperator::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
            (BinaryOperator::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
            _ => {},
        }

        let right = self.eval_expr(right)?;
        Self::eval_logic_values(op, left, &right, position)
    }

    pub(crate) fn eval_logic_values(op: BinaryOperator,
                                    left: &Value,
                                    right: &Value,
                                    position: Position)
                                    -> EvalResult<Value> {
        let (Value::Bool(a), Value::Bool(b)) = (left, right) else {
            return Err(RuntimeError::new(LOGIC_TYPE_ERROR, position));
        };

        Ok(Value::Bool(if op == BinaryOperator::And { *a && *b } else { *a || *b }))
    }
}
