#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation.
///
/// Runtime errors are the only error class that aborts evaluation: the first
/// one raised propagates to the top level and halts the run.
pub enum RuntimeError {
    /// Tried to read or assign a variable that is not bound in any enclosing
    /// scope.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A unary operator was applied to a non-numeric operand.
    OperandMustBeNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An arithmetic or comparison operator received a non-numeric operand.
    OperandsMustBeNumbers {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` received operands that are neither two numbers nor two strings.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not a function.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },

            Self::OperandMustBeNumber { line } => {
                write!(f, "Error on line {line}: Operand must be a number.")
            },

            Self::OperandsMustBeNumbers { line } => {
                write!(f, "Error on line {line}: Operands must be numbers.")
            },

            Self::OperandsMustBeNumbersOrStrings { line } => write!(f,
                                                                    "Error on line {line}: Operands must be numbers or strings."),

            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),

            Self::NotCallable { line } => {
                write!(f, "Error on line {line}: Can only call functions.")
            },

            Self::ArityMismatch { expected,
                                  found,
                                  line, } => write!(f,
                                                    "Error on line {line}: Expected {expected} arguments but got {found}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
