/// Core parsing logic and panic-mode recovery.
///
/// Contains the program-level entry point, the assignment production, and
/// the synchronization routine that lets the parser report several
/// independent errors per run.
pub mod core;

/// Binary operator parsing.
///
/// Implements the binary precedence ladder: logical or/and, equality,
/// comparison, term, factor, and right-associative exponentiation.
pub mod binary;

/// Unary, call, and primary parsing.
///
/// Handles prefix operators, bracketed call chains, literals, variable
/// references, and parenthesized groupings.
pub mod unary;

/// Statement parsing.
///
/// Implements declarations, conditionals, loops (including the C-style
/// desugaring), blocks, print, and return.
pub mod statement;

/// Utility functions for the parser.
///
/// Provides the shared token-stream helpers: peeking checks, conditional
/// consumption, required-token consumption, and identifier parsing.
pub mod utils;
