/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages the scope chain, and produces print output. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as division by zero or invalid operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation, and the stage that resolves `Tailor` fragment
/// inclusions.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Splices included fragment files into the token stream.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Recovers from errors at statement boundaries so several independent
///   errors can be reported per run.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values produced during execution: nil,
/// booleans, numbers, strings, and callables, together with truthiness,
/// equality, and display rules.
pub mod value;
