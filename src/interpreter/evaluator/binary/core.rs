use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// The left operand is always evaluated first. For `oraz` and `lub` the
    /// right operand is evaluated only when the left one does not already
    /// decide the result; every other operator evaluates both operands and
    /// hands them to [`Context::eval_binary_values`].
    ///
    /// # Parameters
    /// - `left`: Left operand.
    /// - `op`: The operator.
    /// - `right`: Right operand.
    /// - `position`: Position of the operator, used for every error it raises.
    pub(crate) fn eval_binary(&mut self,
                              left: &Expr,
                              op: BinaryOperator,
                              right: &Expr,
                              position: Position)
                              -> EvalResult<Value> {
        let left = self.eval_expr(left)?;

        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, &left, right, position);
        }

        let right = self.eval_expr(right)?;
        Self::eval_binary_values(op, &left, &right, position)
    }

    /// Applies a non-short-circuiting operator to two evaluated operands.
    ///
    /// # Example
    /// ```
    /// use pseudokod::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary_values(BinaryOperator::Add,
    ///                                       &Value::Number(2.0),
    ///                                       &Value::Number(3.0),
    ///                                       Position::default()).unwrap();
    /// assert!(sum.strict_eq(&Value::Number(5.0)));
    ///
    /// let text = Context::eval_binary_values(BinaryOperator::Add,
    ///                                        &Value::from("ala"),
    ///                                        &Value::from(" ma kota"),
    ///                                        Position::default()).unwrap();
    /// assert_eq!(text.to_string(), "ala ma kota");
    /// ```
    pub fn eval_binary_values(op: BinaryOperator,
                              left: &Value,
                              right: &Value,
                              position: Position)
                              -> EvalResult<Value> {
        use BinaryOperator::{And, Equal, NotEqual, Or};

        match op {
            _ if op.is_ordering() => Self::eval_ordering(op, left, right, position),
            Equal | NotEqual => Self::eval_equality(op, left, right, position),
            And | Or => Self::eval_logic_values(op, left, right, position),
            _ => Self::eval_scalar_op(op, left, right, position),
        }
    }
}
