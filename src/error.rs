/// Lexing and parsing errors.
///
/// Defines all error types that can occur while scanning and parsing source
/// code. These are collected as diagnostics rather than raised, so several
/// independent errors can be reported from a single run.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// undefined variables, type mismatches, division by zero, and bad calls.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The overall outcome of running a piece of source code.
///
/// Distinguishes the two failure classes the entry point must report with
/// different exit statuses: accumulated lexical/parse diagnostics (evaluation
/// never started) versus a single runtime error (evaluation was aborted).
#[derive(Debug)]
pub enum ExecError {
    /// One or more lexical or parse errors; evaluation did not begin.
    Syntax(Vec<ParseError>),
    /// The runtime error that aborted evaluation.
    Runtime(RuntimeError),
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(errors) => {
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ExecError {}
