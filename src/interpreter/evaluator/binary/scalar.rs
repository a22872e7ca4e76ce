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
    /// Evaluates `+ - * / div mod`.
    ///
    /// `+` adds two numbers or concatenates two strings. The other operators
    /// take numbers only. Division follows IEEE 754, so dividing by zero
    /// yields an infinity or `NaN` rather than an error; `div` floors the
    /// quotient and `mod` keeps the sign of the dividend.
    ///
    /// # Errors
    /// `Operację dodawania można wykonać tylko albo na liczbach, albo na
    /// napisach.` for a bad `+`, `Operacje arytmetyczne można wykonywać tylko
    /// na liczbach.` for the rest.
    pub(crate) fn eval_scalar_op(op: BinaryOperator,
                                 left: &Value,
                                 right: &Value,
                                 position: Position)
                                 -> EvalResult<Value> {
        if op == BinaryOperator::Add {
            return match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Text(a), Value::Text(b)) => Ok(Value::Text(format!("{a}{b}"))),
                _ => Err(RuntimeError::new("Operację dodawania można wykonać tylko albo na \
                                            liczbach, albo na napisach.",
                                           position)),
            };
        }

        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(RuntimeError::new("Operacje arytmetyczne można wykonywać tylko na \
                                          liczbach.",
                                         position));
        };

        let result = match op {
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div => a / b,
            BinaryOperator::IntDiv => (a / b).floor(),
            _ => a % b,
        };

        Ok(Value::Number(result))
    }
}
