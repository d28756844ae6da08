use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `||`. OR is the lowest-precedence
/// operator below assignment. Both logical operators produce
/// `Expr::Logical` nodes, which short-circuit during evaluation.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A logical expression tree.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>,
                               errors: &mut Vec<ParseError>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens, errors)?;

    loop {
        if let Some((Token::Or, line)) = tokens.peek() {
            let line = *line;
            tokens.next();

            let right = parse_logical_and(tokens, errors)?;

            left = Expr::Logical { left: Box::new(left),
                                   op: LogicalOperator::Or,
                                   right: Box::new(right),
                                   line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `&&`. Precedence is just above OR.
///
/// Grammar: `logical_and := equality ("&&" equality)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A logical expression tree.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_equality(tokens, errors)?;

    loop {
        if let Some((Token::And, line)) = tokens.peek() {
            let line = *line;
            tokens.next();

            let right = parse_equality(tokens, errors)?;

            left = Expr::Logical { left: Box::new(left),
                                   op: LogicalOperator::And,
                                   right: Box::new(right),
                                   line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses equality expressions.
///
/// Grammar: `equality := comparison (("==" | "!=") comparison)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A binary expression tree.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>,
                             errors: &mut Vec<ParseError>)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_comparison(tokens, errors)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
        {
            let line = *line;
            tokens.next();

            let right = parse_comparison(tokens, errors)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses comparison expressions.
///
/// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A binary expression tree.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>,
                               errors: &mut Vec<ParseError>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_term(tokens, errors)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::Greater
                       | BinaryOperator::LessEqual
                       | BinaryOperator::GreaterEqual)
        {
            let line = *line;
            tokens.next();

            let right = parse_term(tokens, errors)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `term := factor (("+" | "-") factor)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A binary expression tree.
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>,
                         errors: &mut Vec<ParseError>)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_factor(tokens, errors)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let line = *line;
            tokens.next();

            let right = parse_factor(tokens, errors)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// Grammar: `factor := exponent (("*" | "/") exponent)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A binary expression tree.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>,
                           errors: &mut Vec<ParseError>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_exponent(tokens, errors)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            let line = *line;
            tokens.next();

            let right = parse_exponent(tokens, errors)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`,
/// which is handled by recursing into this same level on the right.
///
/// Grammar: `exponent := unary ("^" exponent)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>,
                             errors: &mut Vec<ParseError>)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_unary(tokens, errors)?;

    if let Some((Token::Caret, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_exponent(tokens, errors)?;
        return Ok(Expr::Binary { left:  Box::new(left),
                                 op:    BinaryOperator::Pow,
                                 right: Box::new(right),
                                 line });
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator (`+`, `-`, `*`, `/`, `^`, comparison and equality operators).
/// Returns `None` for all other tokens, including the logical and
/// assignment operators, which have their own expression forms.
///
/// # Example
/// ```
/// use taylorscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::LessThan => Some(BinaryOperator::Less),
        Token::GreaterThan => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
