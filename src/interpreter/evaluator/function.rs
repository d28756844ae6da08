use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, FlowControl},
            environment::Environment,
        },
        value::Value,
    },
};

/// A runtime value invocable with a fixed number of arguments.
pub trait Callable {
    /// The number of arguments the callable expects.
    fn arity(&self) -> usize;

    /// Invokes the callable with exactly [`arity`](Self::arity) evaluated
    /// argument values.
    ///
    /// # Errors
    /// Propagates any `RuntimeError` raised while executing the body.
    fn call(&self, context: &mut Context, arguments: Vec<Value>) -> EvalResult<Value>;
}

/// A user-defined function value.
///
/// Pairs a `Define` declaration with its fixed arity. The declaration is
/// shared by every value referring to the function, so equality between
/// callables is identity.
#[derive(Debug)]
pub struct Function {
    declaration: FunctionDecl,
}

impl Function {
    pub(crate) const fn new(declaration: FunctionDecl) -> Self {
        Self { declaration }
    }

    /// The function's declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Calls the function.
    ///
    /// Each invocation gets one fresh scope with the parameters bound
    /// positionally to the argument values. The scope encloses the global
    /// scope, not the declaration site: a function declared inside a block
    /// cannot read that block's locals. The body runs as a block under that
    /// scope, and the return signal is intercepted here, at the call
    /// boundary, yielding nil when the body completes without returning.
    fn call(&self, context: &mut Context, arguments: Vec<Value>) -> EvalResult<Value> {
        let mut environment = Environment::with_enclosing(Rc::clone(&context.globals));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param, argument);
        }

        match context.execute_block(&self.declaration.body, Rc::new(RefCell::new(environment)))? {
            FlowControl::Return(value) => Ok(value),
            FlowControl::Normal => Ok(Value::Nil),
        }
    }
}

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee and all arguments are evaluated first, in order. Calling
    /// anything but a callable value is a runtime error, as is supplying an
    /// argument count different from the callable's declared arity.
    ///
    /// # Parameters
    /// - `callee`: The expression being called.
    /// - `arguments`: The unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The called function's return value.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let callee = self.eval(callee)?;

        let mut evaluated = Vec::with_capacity(arguments.len());
        for argument in arguments {
            evaluated.push(self.eval(argument)?);
        }

        let Value::Callable(function) = callee else {
            return Err(RuntimeError::NotCallable { line });
        };

        if evaluated.len() != function.arity() {
            return Err(RuntimeError::ArityMismatch { expected: function.arity(),
                                                     found:    evaluated.len(),
                                                     line });
        }

        function.call(self, evaluated)
    }
}
