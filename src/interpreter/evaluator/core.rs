use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator, Statement},
    error::RuntimeError,
    interpreter::{evaluator::environment::Environment, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The non-local control signal threaded through statement execution.
///
/// `BackTo` does not throw; it makes every statement report whether
/// execution continues normally or is unwinding with a return value. The
/// function-call boundary is the one place a `Return` is intercepted, so
/// statements outside the returning function are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowControl {
    /// Execution continues with the next statement.
    Normal,
    /// A `BackTo` is unwinding with the returned value.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds all interpreter state: the global scope, the currently
/// active scope, and the sink print output is written to. It is created
/// once and reused across evaluations, which is what lets the interactive
/// prompt keep variables and functions alive between lines.
pub struct Context {
    /// The global scope; function call scopes enclose this directly.
    pub(crate) globals:     Rc<RefCell<Environment>>,
    /// The currently active scope.
    pub(crate) environment: Rc<RefCell<Environment>>,
    /// Where `SpeakNow` output goes.
    pub(crate) out:         Box<dyn Write>,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a new evaluation context with an empty global scope, printing
    /// to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates a new evaluation context printing to `out` instead of
    /// standard output.
    #[must_use]
    pub fn with_output(out: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        Self { globals: Rc::clone(&globals),
               environment: globals,
               out }
    }

    /// Executes a statement list against the persistent global scope.
    ///
    /// This is the top-level runner: it stops at the first runtime error
    /// and otherwise runs every statement in order. A top-level `BackTo`
    /// ends the run cleanly, like returning from a program's main function.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised, with the offending token's
    /// line.
    pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            if let FlowControl::Return(_) = self.eval_statement(statement)? {
                break;
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// groupings, unary and binary operations, short-circuiting logic,
    /// variable references, assignments, and calls.
    ///
    /// Evaluation is a pure function of the current environment except for
    /// calls, whose bodies may print or mutate bindings.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The expression's value.
    ///
    /// # Errors
    /// Propagates any `RuntimeError` raised by operand type checks, scope
    /// lookups, or calls.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { expr, .. } => self.eval(expr),
            Expr::Unary { op, expr, line } => {
                let operand = self.eval(expr)?;
                Self::eval_unary(*op, &operand, *line)
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::Assign { name,
                           value,
                           op,
                           line, } => self.eval_assign(name, value, *op, *line),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
        }
    }

    /// Evaluates a short-circuiting logical expression.
    ///
    /// The right operand is only evaluated when the left operand's
    /// truthiness does not already determine the result, and the
    /// expression's value is whichever operand decided the outcome, not a
    /// coerced boolean.
    fn eval_logical(&mut self,
                    left: &Expr,
                    op: LogicalOperator,
                    right: &Expr)
                    -> EvalResult<Value> {
        let left = self.eval(left)?;

        match op {
            LogicalOperator::Or if left.is_truthy() => Ok(left),
            LogicalOperator::And if !left.is_truthy() => Ok(left),
            _ => self.eval(right),
        }
    }

    /// Resolves a variable reference through the scope chain.
    pub(crate) fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.environment
            .borrow()
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Evaluates an assignment, plain or compound.
    ///
    /// The right-hand side is evaluated first. For compound operators, the
    /// current binding is fetched and combined with the right-hand value
    /// through the normal binary-operation path, so the same type checks
    /// apply. The name must already be bound somewhere in the scope chain.
    fn eval_assign(&mut self,
                   name: &str,
                   value: &Expr,
                   op: Option<BinaryOperator>,
                   line: usize)
                   -> EvalResult<Value> {
        let mut result = self.eval(value)?;

        if let Some(op) = op {
            let current = self.eval_variable(name, line)?;
            result = Self::eval_binary(op, &current, &result, line)?;
        }

        if self.environment.borrow_mut().assign(name, result.clone()) {
            Ok(result)
        } else {
            Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                  line })
        }
    }
}
