use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{check, expect, match_token},
        },
    },
};

/// Parses a unary expression.
///
/// Grammar: `unary := ("!" | "-") unary | call`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A unary expression node, or the underlying call expression.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                          errors: &mut Vec<ParseError>)
                          -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((token, line)) = tokens.peek() {
        let op = match token {
            Token::Bang => Some(UnaryOperator::Not),
            Token::Minus => Some(UnaryOperator::Negate),
            _ => None,
        };
        if let Some(op) = op {
            let line = *line;
            tokens.next();

            let expr = parse_unary(tokens, errors)?;
            return Ok(Expr::Unary { op,
                                    expr: Box::new(expr),
                                    line });
        }
    }

    parse_call(tokens, errors)
}

/// Parses a call expression.
///
/// A primary expression followed by zero or more bracketed argument lists,
/// left-associative, so chained calls like `f[1][2]` work.
///
/// Grammar: `call := primary ("[" arguments? "]")*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A call expression tree, or the plain primary expression.
pub fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                         errors: &mut Vec<ParseError>)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens, errors)?;

    while let Some((Token::LBracket, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        expr = finish_call(tokens, errors, expr, line)?;
    }

    Ok(expr)
}

/// Parses the argument list of a call after its opening bracket.
///
/// Arguments cap at 255; going over records a diagnostic but parsing
/// continues.
fn finish_call<'a, I>(tokens: &mut Peekable<I>,
                      errors: &mut Vec<ParseError>,
                      callee: Expr,
                      line: usize)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();

    if !check(tokens, &Token::RBracket) {
        loop {
            if arguments.len() == 255 {
                let line = tokens.peek().map_or(line, |(_, l)| *l);
                errors.push(ParseError::TooManyArguments { line });
            }
            arguments.push(parse_expression(tokens, errors)?);
            if !match_token(tokens, &Token::Comma) {
                break;
            }
        }
    }
    expect(tokens, &Token::RBracket, "Expect ']' after arguments.")?;

    Ok(Expr::Call { callee: Box::new(callee),
                    arguments,
                    line })
}

/// Parses a primary expression.
///
/// Primaries are the leaves of the expression grammar: literals, variable
/// references, and parenthesized groupings.
///
/// Grammar: `primary := NUMBER | STRING | "The1" | "The0" | "BlankSpace" |
/// IDENT | "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// The parsed leaf expression.
///
/// # Errors
/// Returns a `ParseError` when the next token cannot begin an expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                            errors: &mut Vec<ParseError>)
                            -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::False, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Bool(false),
                               line })
        },
        Some((Token::True, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Bool(true),
                               line })
        },
        Some((Token::Nil, line)) => {
            let line = *line;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Nil,
                               line })
        },
        Some((Token::Number(n), line)) => {
            let (value, line) = (*n, *line);
            tokens.next();
            Ok(Expr::Literal { value: value.into(),
                               line })
        },
        Some((Token::Str(s), line)) => {
            let (value, line) = (s.clone(), *line);
            tokens.next();
            Ok(Expr::Literal { value: value.into(),
                               line })
        },
        Some((Token::Identifier(name), line)) => {
            let (name, line) = (name.clone(), *line);
            tokens.next();
            Ok(Expr::Variable { name, line })
        },
        Some((Token::LParen, line)) => {
            let line = *line;
            tokens.next();

            let expr = parse_expression(tokens, errors)?;
            expect(tokens, &Token::RParen, "Expect ')' after expression.")?;
            Ok(Expr::Grouping { expr: Box::new(expr),
                                line })
        },
        Some((Token::Eof, line)) => {
            Err(ParseError::UnexpectedEndOfInput { message: "Expect expression.".to_string(),
                                                   line:    *line, })
        },
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { message: "Expect expression.".to_string(),
                                              token:   token.to_string(),
                                              line:    *line, })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { message: "Expect expression.".to_string(),
                                                   line:    0, })
        },
    }
}
