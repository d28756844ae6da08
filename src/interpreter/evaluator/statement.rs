use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    ast::Statement,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, FlowControl},
            environment::Environment,
            function::Function,
        },
        value::Value,
    },
};

impl Context {
    /// Executes a single statement.
    ///
    /// Handles expression statements, print, variable declarations, blocks,
    /// conditionals, loops, function declarations, and return. Statements
    /// may modify the context or produce print output.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// [`FlowControl::Normal`] when execution continues, or
    /// [`FlowControl::Return`] when a `BackTo` is unwinding toward its call
    /// boundary.
    ///
    /// # Errors
    /// Propagates the first `RuntimeError` raised while executing.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<FlowControl> {
        match statement {
            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(FlowControl::Normal)
            },

            Statement::Print { expr, .. } => {
                let value = self.eval(expr)?;
                let _ = writeln!(self.out, "{value}");
                Ok(FlowControl::Normal)
            },

            Statement::Let { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name, value);
                Ok(FlowControl::Normal)
            },

            Statement::Block { statements } => {
                let child = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, Rc::new(RefCell::new(child)))
            },

            Statement::If { condition,
                            then_branch,
                            else_branch, } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_statement(else_branch)
                } else {
                    Ok(FlowControl::Normal)
                }
            },

            Statement::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    if let FlowControl::Return(value) = self.eval_statement(body)? {
                        return Ok(FlowControl::Return(value));
                    }
                }
                Ok(FlowControl::Normal)
            },

            Statement::Function(declaration) => {
                let function = Value::Callable(Rc::new(Function::new(declaration.clone())));
                self.environment.borrow_mut().define(&declaration.name, function);
                Ok(FlowControl::Normal)
            },

            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Ok(FlowControl::Return(value))
            },
        }
    }

    /// Executes a statement list under a given scope.
    ///
    /// The scope is installed as the active environment for the duration of
    /// the block and the previous scope is restored unconditionally on the
    /// way out, including when a runtime error or return signal is
    /// propagating. This keeps the scope chain balanced under all control
    /// paths.
    ///
    /// # Parameters
    /// - `statements`: The block's statements.
    /// - `environment`: The scope the block runs under.
    ///
    /// # Returns
    /// The flow signal of the first statement that did not complete
    /// normally, or [`FlowControl::Normal`].
    pub(crate) fn execute_block(&mut self,
                                statements: &[Statement],
                                environment: Rc<RefCell<Environment>>)
                                -> EvalResult<FlowControl> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut outcome = Ok(FlowControl::Normal);
        for statement in statements {
            match self.eval_statement(statement) {
                Ok(FlowControl::Normal) => {},
                other => {
                    outcome = other;
                    break;
                },
            }
        }

        self.environment = previous;
        outcome
    }
}
