use std::rc::Rc;

use crate::{ast::LiteralValue, interpreter::evaluator::function::Function};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. There is no
/// integer type: all numeric values are double-precision floats.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value, written `BlankSpace` in source code.
    Nil,
    /// A boolean value (`The1` or `The0`).
    Bool(bool),
    /// A numeric value (double-precision floating-point).
    Number(f64),
    /// A string value.
    Str(String),
    /// A callable function value.
    Callable(Rc<Function>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Nil => Self::Nil,
        }
    }
}

impl Value {
    /// Returns whether the value behaves as true in a conditional context.
    ///
    /// Only nil and `The0` are falsy; every other value is truthy, including
    /// numeric zero and the empty string.
    ///
    /// # Example
    /// ```
    /// use taylorscript::interpreter::value::Value;
    ///
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(Value::Str(String::new()).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }
}

/// Value equality as observed by the `==` and `!=` operators.
///
/// Nil equals only nil, same-type values compare by value, and values of
/// different types are unequal rather than an error. Callables compare by
/// identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "BlankSpace"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Callable(function) => write!(f, "<fn {}>", function.name()),
        }
    }
}
