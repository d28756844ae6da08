use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic and comparison operators require numeric operands, with
    /// one exception: `+` also concatenates two strings. Division by
    /// exactly zero is an error rather than an infinite result. Equality is
    /// defined for every operand combination and never fails; values of
    /// different types are simply unequal.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use taylorscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let left = Value::Number(3.0);
    /// let right = Value::Number(4.0);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Number(7.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Pow, Sub,
        };
        use Value::{Bool, Number, Str};

        match op {
            Add => match (left, right) {
                (Number(a), Number(b)) => Ok(Number(a + b)),
                (Str(a), Str(b)) => Ok(Str(format!("{a}{b}"))),
                _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { line }),
            },

            Sub => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Number(a - b))
            },

            Mul => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Number(a * b))
            },

            Div => {
                let (a, b) = numeric_operands(left, right, line)?;
                if b == 0.0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                Ok(Number(a / b))
            },

            Pow => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Number(a.powf(b)))
            },

            Less => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Bool(a < b))
            },

            Greater => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Bool(a > b))
            },

            LessEqual => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Bool(a <= b))
            },

            GreaterEqual => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Bool(a >= b))
            },

            Equal => Ok(Bool(left == right)),
            NotEqual => Ok(Bool(left != right)),
        }
    }
}

/// Extracts two numeric operands, or reports a type error.
fn numeric_operands(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { line }),
    }
}
