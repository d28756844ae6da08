/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, expression
/// dispatch, and the flow-control signal used by `BackTo`.
pub mod core;

/// The environment chain.
///
/// Defines the scope type: a name-to-value map with an optional enclosing
/// scope for delegated lookup and assignment.
pub mod environment;

/// Function values and call evaluation.
///
/// Handles user-defined function declarations as callable values, argument
/// checking, and return-value interception.
pub mod function;

/// Statement execution.
///
/// Implements execution for all statement forms, including block scoping
/// with guaranteed scope restoration.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, string concatenation, comparisons, and equality.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;
