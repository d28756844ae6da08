use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Negation requires a numeric operand. Logical NOT applies to any
    /// value through its truthiness and always yields a boolean.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: The evaluated operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_unary(op: UnaryOperator, operand: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match operand {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!operand.is_truthy())),
        }
    }
}
