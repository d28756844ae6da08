use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDecl, LiteralValue, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression, synchronize},
            utils::{at_end, check, expect, match_token, parse_identifier},
        },
    },
};

/// Parses a single declaration.
///
/// A declaration is a function declaration (`Define`), a variable
/// declaration (`Let`), or any other statement. This is the production the
/// panic-mode recovery loops re-enter after a parse error.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Func, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        return parse_function(tokens, errors, line);
    }
    if let Some((Token::Var, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        return parse_var_declaration(tokens, errors, line);
    }

    parse_statement(tokens, errors)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `When` conditional,
/// - a `SpeakNow` print statement,
/// - a `BackTo` return statement,
/// - an `AllTooWhile` loop,
/// - a bracketed block,
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              errors: &mut Vec<ParseError>)
                              -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, _)) => {
            tokens.next();
            parse_if(tokens, errors, "When")
        },
        Some((Token::Print, line)) => {
            let line = *line;
            tokens.next();
            parse_print(tokens, errors, line)
        },
        Some((Token::Return, line)) => {
            let line = *line;
            tokens.next();
            parse_return(tokens, errors, line)
        },
        Some((Token::Loop, _)) => {
            tokens.next();
            parse_loop(tokens, errors)
        },
        Some((Token::LBracket, _)) => {
            tokens.next();
            Ok(Statement::Block { statements: parse_block(tokens, errors)?, })
        },
        _ => {
            let line = tokens.peek().map_or(0, |(_, l)| *l);
            let expr = parse_expression(tokens, errors)?;
            expect(tokens, &Token::Semicolon, "Expect ';' after expression.")?;
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Parses a variable declaration after its `Let` keyword.
///
/// A declaration has the form `Let <identifier> (= <expression>)? ;`.
/// Without an initializer the variable is bound to nil at execution.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `Let`.
/// - `errors`: Sink for diagnostics that do not abort parsing.
/// - `line`: Line number of the `Let` token.
///
/// # Returns
/// A `Statement::Let` node.
///
/// # Errors
/// Returns a `ParseError` if the name is missing, the initializer is
/// malformed, or the terminating `;` is absent.
pub(in crate::interpreter::parser) fn parse_var_declaration<'a, I>(
    tokens: &mut Peekable<I>,
    errors: &mut Vec<ParseError>,
    line: usize)
    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "Expect variable name.")?;

    let initializer = if match_token(tokens, &Token::Equal) {
        Some(parse_expression(tokens, errors)?)
    } else {
        None
    };

    expect(tokens,
           &Token::Semicolon,
           "Expect ';' after variable declaration.")?;
    Ok(Statement::Let { name,
                        initializer,
                        line })
}

/// Parses a `When` conditional after its keyword.
///
/// Syntax:
/// ```text
///     When[<condition>] <statement>
///     Then[<condition>] <statement>
///     Thats <statement>
/// ```
/// A `Then` branch parses recursively as a nested `When` assigned to the
/// else slot, so a chain of conditions is checked left to right. At most one
/// final `Thats` branch is allowed per `When`/`Then`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the keyword.
/// - `errors`: Sink for diagnostics that do not abort parsing.
/// - `keyword`: The keyword that introduced this branch (`When` or `Then`),
///   used in diagnostics.
///
/// # Returns
/// A `Statement::If` node representing the full conditional chain.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   errors: &mut Vec<ParseError>,
                   keyword: &str)
                   -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens,
           &Token::LBracket,
           &format!("Expect '[' after '{keyword}'."))?;
    let condition = parse_expression(tokens, errors)?;
    expect(tokens,
           &Token::RBracket,
           &format!("Expect ']' after '{keyword}' condition."))?;

    let then_branch = Box::new(parse_statement(tokens, errors)?);

    let else_branch = if match_token(tokens, &Token::Elif) {
        Some(Box::new(parse_if(tokens, errors, "Then")?))
    } else if match_token(tokens, &Token::Else) {
        Some(Box::new(parse_statement(tokens, errors)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch })
}

/// Parses a print statement after its `SpeakNow` keyword.
///
/// Syntax: `SpeakNow[<expression>];`
fn parse_print<'a, I>(tokens: &mut Peekable<I>,
                      errors: &mut Vec<ParseError>,
                      line: usize)
                      -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBracket, "Expect '[' before expression.")?;
    let expr = parse_expression(tokens, errors)?;
    expect(tokens, &Token::RBracket, "Expect ']' after expression.")?;
    expect(tokens, &Token::Semicolon, "Expect ';' after value.")?;

    Ok(Statement::Print { expr, line })
}

/// Parses a return statement after its `BackTo` keyword.
///
/// Syntax: `BackTo <expression>? ;` — the value is optional and defaults to
/// nil at execution.
fn parse_return<'a, I>(tokens: &mut Peekable<I>,
                       errors: &mut Vec<ParseError>,
                       line: usize)
                       -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let value = if check(tokens, &Token::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens, errors)?)
    };

    expect(tokens, &Token::Semicolon, "Expect ';' after return value.")?;
    Ok(Statement::Return { value, line })
}

/// Parses a loop after its `AllTooWhile` keyword.
///
/// The loop header is unified: a leading `;`, a `Let` declaration, or any
/// expression followed by `;` selects the C-style for form (optional
/// initializer, condition, and increment); an expression followed directly
/// by `]` is a plain while loop. Both desugar to a single
/// `Statement::While`, the for form wrapped in a block that runs the
/// initializer once and re-runs the increment after each iteration.
///
/// # Parameters
/// - `tokens`: Token stream positioned after `AllTooWhile`.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// The desugared loop statement.
fn parse_loop<'a, I>(tokens: &mut Peekable<I>,
                     errors: &mut Vec<ParseError>)
                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBracket, "Expect '[' after 'AllTooWhile'.")?;

    if match_token(tokens, &Token::Semicolon) {
        return parse_for(tokens, errors, None);
    }
    if let Some((Token::Var, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let initializer = parse_var_declaration(tokens, errors, line)?;
        return parse_for(tokens, errors, Some(initializer));
    }

    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens, errors)?;

    if match_token(tokens, &Token::Semicolon) {
        return parse_for(tokens, errors, Some(Statement::Expression { expr, line }));
    }

    expect(tokens, &Token::RBracket, "Expect ']' after condition.")?;
    let body = Box::new(parse_statement(tokens, errors)?);

    Ok(Statement::While { condition: expr,
                          body })
}

/// Parses the remainder of a C-style loop header and desugars it.
///
/// The initializer, when present, has already consumed its own `;`. A
/// missing condition defaults to a literal true.
fn parse_for<'a, I>(tokens: &mut Peekable<I>,
                    errors: &mut Vec<ParseError>,
                    initializer: Option<Statement>)
                    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = if check(tokens, &Token::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens, errors)?)
    };
    expect(tokens, &Token::Semicolon, "Expect ';' after loop condition.")?;

    let increment = if check(tokens, &Token::RBracket) {
        None
    } else {
        Some(parse_expression(tokens, errors)?)
    };
    let line = expect(tokens, &Token::RBracket, "Expect ']' after loop header.")?;

    let mut body = parse_statement(tokens, errors)?;

    if let Some(increment) = increment {
        body = Statement::Block { statements: vec![body,
                                                   Statement::Expression { expr: increment,
                                                                           line }], };
    }

    let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                        line });
    let mut statement = Statement::While { condition,
                                           body: Box::new(body) };

    if let Some(initializer) = initializer {
        statement = Statement::Block { statements: vec![initializer, statement], };
    }

    Ok(statement)
}

/// Parses a function declaration after its `Define` keyword.
///
/// Syntax: `Define <name>[<params>] [ <body> ]`. Parameters cap at 255;
/// going over records a diagnostic but parsing continues.
///
/// # Parameters
/// - `tokens`: Token stream positioned after `Define`.
/// - `errors`: Sink for diagnostics that do not abort parsing.
/// - `line`: Line number of the `Define` token.
///
/// # Returns
/// A `Statement::Function` node.
fn parse_function<'a, I>(tokens: &mut Peekable<I>,
                         errors: &mut Vec<ParseError>,
                         line: usize)
                         -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "Expect function name.")?;
    expect(tokens, &Token::LBracket, "Expect '[' after function name.")?;

    let mut params = Vec::new();
    if !check(tokens, &Token::RBracket) {
        loop {
            if params.len() == 255 {
                let line = tokens.peek().map_or(line, |(_, l)| *l);
                errors.push(ParseError::TooManyParameters { line });
            }
            params.push(parse_identifier(tokens, "Expect parameter name.")?);
            if !match_token(tokens, &Token::Comma) {
                break;
            }
        }
    }
    expect(tokens, &Token::RBracket, "Expect ']' after parameters.")?;

    expect(tokens, &Token::LBracket, "Expect '[' before function body.")?;
    let body = parse_block(tokens, errors)?;

    Ok(Statement::Function(FunctionDecl { name,
                                          params,
                                          body,
                                          line }))
}

/// Parses the statements of a block after its opening bracket.
///
/// Runs the same per-declaration recovery as the top level, so an error
/// inside a block does not swallow the block's remaining statements.
///
/// # Parameters
/// - `tokens`: Token stream positioned after `[`.
/// - `errors`: Sink for diagnostics that do not abort parsing.
///
/// # Returns
/// The statements up to the closing bracket.
pub(in crate::interpreter::parser) fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                                                         errors: &mut Vec<ParseError>)
                                                         -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while !check(tokens, &Token::RBracket) && !at_end(tokens) {
        match parse_declaration(tokens, errors) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                errors.push(error);
                synchronize(tokens);
            },
        }
    }

    expect(tokens, &Token::RBracket, "Expect ']' after block.")?;
    Ok(statements)
}
