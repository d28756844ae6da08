use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Returns `true` when the next token matches `expected` without consuming
/// it.
pub(in crate::interpreter::parser) fn check<'a, I>(tokens: &mut Peekable<I>,
                                                   expected: &Token)
                                                   -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(tokens.peek(), Some((token, _)) if *token == *expected)
}

/// Consumes the next token when it matches `expected`.
///
/// # Returns
/// `true` when the token matched and was consumed, `false` otherwise.
pub(in crate::interpreter::parser) fn match_token<'a, I>(tokens: &mut Peekable<I>,
                                                         expected: &Token)
                                                         -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if check(tokens, expected) {
        tokens.next();
        return true;
    }
    false
}

/// Returns `true` when the stream is at the end-of-input marker.
pub(in crate::interpreter::parser) fn at_end<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(tokens.peek(), None | Some((Token::Eof, _)))
}

/// Consumes the next token, requiring it to match `expected`.
///
/// This is the parser's main structural check: every bracket, semicolon, and
/// keyword the grammar requires goes through here.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the required token.
/// - `expected`: The required token.
/// - `message`: What the grammar expected at this point, used verbatim in the
///   diagnostic.
///
/// # Returns
/// The line number of the consumed token.
///
/// # Errors
/// Returns a `ParseError` naming the offending token (or "at end") when the
/// next token does not match. The offending token is not consumed.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    message: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((token, line)) if *token == *expected => {
            let line = *line;
            tokens.next();
            Ok(line)
        },
        Some((Token::Eof, line)) => {
            Err(ParseError::UnexpectedEndOfInput { message: message.to_string(),
                                                   line:    *line, })
        },
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { message: message.to_string(),
                                              token:   token.to_string(),
                                              line:    *line, })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { message: message.to_string(),
                                                   line:    0, })
        },
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` carrying `message` when the next token is not an
/// identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              message: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Identifier(name), _)) => {
            let name = name.clone();
            tokens.next();
            Ok(name)
        },
        Some((Token::Eof, line)) => {
            Err(ParseError::UnexpectedEndOfInput { message: message.to_string(),
                                                   line:    *line, })
        },
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { message: message.to_string(),
                                              token:   token.to_string(),
                                              line:    *line, })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { message: message.to_string(),
                                                   line:    0, })
        },
    }
}
