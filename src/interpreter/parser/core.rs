use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical_or, statement::parse_declaration, utils::at_end},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program into its top-level statement list.
///
/// This is the entry point for parsing. Declarations are parsed one after
/// another until the end-of-input token; the parser never advances past it.
///
/// Errors do not abort the parse: when a declaration fails, the error is
/// recorded in `errors` and the token stream is resynchronized at the next
/// statement boundary, so later independent errors are still surfaced. A
/// caller must treat a non-empty `errors` list as a failed parse and not
/// evaluate the returned statements.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for accumulated parse diagnostics.
///
/// # Returns
/// The parsed top-level statements.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>,
                            errors: &mut Vec<ParseError>)
                            -> Vec<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while !at_end(tokens) {
        match parse_declaration(tokens, errors) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                errors.push(error);
                synchronize(tokens);
            },
        }
    }

    statements
}

/// Discards tokens until a likely statement boundary.
///
/// After a parse error the stream is positioned at an arbitrary offending
/// token. Tokens are dropped until just past a `;` or until the next token
/// begins a declaration or statement, which bounds the number of reported
/// errors to roughly one per malformed region.
pub(in crate::interpreter::parser) fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((token, _)) = tokens.peek() {
        match token {
            Token::Eof => break,
            Token::Semicolon => {
                tokens.next();
                break;
            },
            Token::Func
            | Token::Var
            | Token::If
            | Token::Loop
            | Token::Print
            | Token::Return => break,
            _ => {
                tokens.next();
            },
        }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               errors: &mut Vec<ParseError>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens, errors)
}

/// Parses an assignment expression, plain or compound.
///
/// Assignment is right-associative and only valid when the left side is a
/// variable reference. Any other left side records an
/// invalid-assignment-target diagnostic but does not abort the parse; the
/// already-parsed left side is returned so parsing continues normally.
///
/// Grammar: `assignment := logical_or (("=" | "+=" | "-=" | "*=" | "/=")
/// assignment)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// An `Expr::Assign` node, or the plain left side when no assignment
/// operator follows.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                               errors: &mut Vec<ParseError>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_logical_or(tokens, errors)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = assignment_operator(token)
    {
        let line = *line;
        tokens.next();

        let value = parse_assignment(tokens, errors)?;

        return match expr {
            Expr::Variable { name, .. } => Ok(Expr::Assign { name,
                                                             value: Box::new(value),
                                                             op,
                                                             line }),
            other => {
                errors.push(ParseError::InvalidAssignmentTarget { line });
                Ok(other)
            },
        };
    }

    Ok(expr)
}

/// Maps a token to its assignment meaning.
///
/// # Returns
/// - `Some(None)` for plain `=`,
/// - `Some(Some(op))` for a compound assignment operator,
/// - `None` when the token is not an assignment operator at all.
const fn assignment_operator(token: &Token) -> Option<Option<BinaryOperator>> {
    match token {
        Token::Equal => Some(None),
        Token::PlusEqual => Some(Some(BinaryOperator::Add)),
        Token::MinusEqual => Some(Some(BinaryOperator::Sub)),
        Token::StarEqual => Some(Some(BinaryOperator::Mul)),
        Token::SlashEqual => Some(Some(BinaryOperator::Div)),
        _ => None,
    }
}
