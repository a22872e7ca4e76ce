use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `> < >= <=`.
    ///
    /// Both operands must be numbers, or both strings. Strings compare by
    /// code point.
    pub(crate) fn eval_ordering(op: BinaryOperator,
                                left: &Value,
                                right: &Value,
                                position: Position)
                                -> EvalResult<Value> {
        use BinaryOperator::{Greater, GreaterEqual, Less, LessEqual};

        let ordering = match (left, right) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => {
                return Err(RuntimeError::new("Porównywać można tylko albo liczby, albo napisy.",
                                             position));
            },
        };

        // NaN compares false with everything.
        let Some(ordering) = ordering else {
            return Ok(Value::Bool(false));
        };

        Ok(Value::Bool(match op {
                           Greater => ordering.is_gt(),
                           Less => ordering.is_lt(),
                           GreaterEqual => ordering.is_ge(),
                           LessEqual => ordering.is_le(),
                           _ => false,
                       }))
    }

    /// Evaluates `==` and `!=`.
    ///
    /// The operands must be of the same type; arrays and functions are
    /// compared by identity.
    pub(crate) fn eval_equality(op: BinaryOperator,
                                left: &Value,
                                right: &Value,
                                position: Position)
                                -> EvalResult<Value> {
        if left.type_class() != right.type_class() {
            return Err(RuntimeError::new("Porównywać można tylko wartości tego samego typu.",
                                         position));
        }

        let equal = left.strict_eq(right);
        Ok(Value::Bool(if op == BinaryOperator::Equal { equal } else { !equal }))
    }
}
