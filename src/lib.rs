//! # taylorscript
//!
//! TaylorScript is a small dynamically-typed scripting language written in
//! Rust: a lexer, a recursive-descent parser, and a tree-walking evaluator
//! with lexically-scoped mutable environments, first-class functions, and a
//! themed keyword vocabulary (`Define`, `When`, `AllTooWhile`, `SpeakNow`,
//! ...) mapped onto conventional control-flow constructs.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ExecError,
    interpreter::{evaluator::core::Context, lexer::scan_tokens, parser::core::parse_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including source lines for debugging and
/// user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Distinguishes syntax outcomes from runtime outcomes for exit statuses.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and error handling to provide a complete runtime for
/// TaylorScript source. It exposes the public API for interpreting and
/// executing programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for scanning, parsing, and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Runs a piece of source code against an existing evaluation context.
///
/// The source is scanned and parsed in full; if any lexical or parse
/// diagnostics accumulated, they are returned together and evaluation never
/// begins. Otherwise the statements execute against `context`, whose global
/// scope persists between calls — this is what gives the interactive prompt
/// its memory.
///
/// # Errors
/// Returns [`ExecError::Syntax`] with every collected lexical/parse
/// diagnostic, or [`ExecError::Runtime`] with the error that aborted
/// evaluation.
///
/// # Examples
/// ```
/// use taylorscript::{interpreter::evaluator::core::Context, run};
///
/// let mut context = Context::new();
/// assert!(run("Let x = 2 + 3;", &mut context).is_ok());
///
/// // 'x' is still bound in the same context.
/// assert!(run("Let y = x * 2;", &mut context).is_ok());
///
/// // 'z' was never declared.
/// assert!(run("z = 1;", &mut context).is_err());
/// ```
pub fn run(source: &str, context: &mut Context) -> Result<(), ExecError> {
    let (tokens, mut errors) = scan_tokens(source);

    let mut tokens = tokens.iter().peekable();
    let statements = parse_program(&mut tokens, &mut errors);

    if !errors.is_empty() {
        return Err(ExecError::Syntax(errors));
    }

    context.interpret(&statements).map_err(ExecError::Runtime)
}
