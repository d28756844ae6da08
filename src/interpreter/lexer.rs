use std::fs;

use logos::{FilterResult, Logos};

use crate::error::ParseError;

/// File extension appended to `Tailor` fragment paths.
const FRAGMENT_EXTENSION: &str = ".lor";

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexicalError)]
pub enum Token {
    /// Numeric literal tokens, such as `13` or `19.89`. All numbers are
    /// double-precision floats; a trailing `.` without a following digit is
    /// not consumed.
    #[regex(r"[0-9]+\.[0-9]+", parse_number)]
    #[regex(r"[0-9]+", parse_number)]
    Number(f64),
    /// String literal tokens. The value is the contents between the quotes.
    #[token("\"", scan_string)]
    Str(String),
    /// `Define`; begins a function declaration.
    #[token("Define")]
    Func,
    /// `Mine` (reserved).
    #[token("Mine")]
    Input,
    /// `When`; begins a conditional.
    #[token("When")]
    If,
    /// `Thats`; the else branch of a conditional.
    #[token("Thats")]
    Else,
    /// `Then`; the else-if branch of a conditional.
    #[token("Then")]
    Elif,
    /// `AllTooWhile`; begins the unified for/while loop.
    #[token("AllTooWhile")]
    Loop,
    /// `BlankSpace`; the nil literal.
    #[token("BlankSpace")]
    Nil,
    /// `The1`; the true literal.
    #[token("The1")]
    True,
    /// `The0`; the false literal.
    #[token("The0")]
    False,
    /// `SpeakNow`; begins a print statement.
    #[token("SpeakNow")]
    Print,
    /// `BackTo`; begins a return statement.
    #[token("BackTo")]
    Return,
    /// `Evermore` (reserved).
    #[token("Evermore")]
    Continue,
    /// `Clean` (reserved).
    #[token("Clean")]
    Clear,
    /// `Dear` (reserved).
    #[token("Dear")]
    Switch,
    /// `John` (reserved).
    #[token("John")]
    Case,
    /// `Closure` (reserved).
    #[token("Closure")]
    Default,
    /// `Let`; begins a variable declaration.
    #[token("Let")]
    Var,
    /// `Fear` (reserved).
    #[token("Fear")]
    Try,
    /// `Less` (reserved).
    #[token("Less")]
    Catch,
    /// `Tailor`; the fragment inclusion call-word. Consumed by the scan
    /// driver together with its bracketed path and never reaches the parser.
    #[token("Tailor")]
    Tailor,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `<`
    #[token("<")]
    LessThan,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    GreaterThan,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `+=`
    #[token("+=")]
    PlusEqual,
    /// `-=`
    #[token("-=")]
    MinusEqual,
    /// `*=`
    #[token("*=")]
    StarEqual,
    /// `/=`
    #[token("/=")]
    SlashEqual,
    /// `&&`
    #[token("&&")]
    And,
    /// `||`
    #[token("||")]
    Or,
    /// `-- Comments.`
    #[regex(r"--[^\n]*", logos::skip)]
    Comment,
    /// `-* Multiline comments. *-`
    #[token("-*", scan_block_comment)]
    MultiLineComment,
    /// Newlines are discarded after bumping the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, carriage returns, and tabs.
    #[regex(r"[ \r\t\f]+", logos::skip)]
    Ignored,
    /// End-of-input marker. NUL is the scanner's end sentinel, so this is
    /// never produced from real source text; the scan driver appends exactly
    /// one after the top-level source is exhausted.
    #[token("\0")]
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Classifies a failure of the scanner to produce a token.
///
/// The scan driver pairs these with the offending slice and line number to
/// build full [`ParseError`] diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexicalError {
    /// A character that starts no token.
    #[default]
    UnexpectedCharacter,
    /// A string literal that was still open at the end of input.
    UnterminatedString,
    /// A `-*` block comment that was never closed.
    UnterminatedComment,
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Consumes a string literal after its opening quote.
///
/// Scans to the next unescaped `"`, counting embedded newlines so line
/// numbers stay accurate across multi-line strings. The produced value is
/// the raw text between the quotes.
fn scan_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexicalError> {
    let remainder = lex.remainder();
    let mut escaped = false;

    for (offset, c) in remainder.char_indices() {
        if c == '\n' {
            lex.extras.line += 1;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                let contents = remainder[..offset].to_string();
                lex.bump(offset + 1);
                return Ok(contents);
            },
            _ => {},
        }
    }

    lex.bump(remainder.len());
    Err(LexicalError::UnterminatedString)
}

/// Consumes a `-*` block comment through its closing `*-`.
///
/// Embedded newlines bump the line counter so tokens after the comment keep
/// accurate line numbers.
fn scan_block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexicalError> {
    let remainder = lex.remainder();

    match remainder.find("*-") {
        Some(end) => {
            lex.extras.line += remainder[..end].matches('\n').count();
            lex.bump(end + 2);
            FilterResult::Skip
        },
        None => {
            lex.extras.line += remainder.matches('\n').count();
            lex.bump(remainder.len());
            FilterResult::Error(LexicalError::UnterminatedComment)
        },
    }
}

/// Scans source text into a token sequence plus lexical diagnostics.
///
/// This is the entry point for lexing. The returned sequence pairs each
/// token with the line it was scanned on and is terminated by exactly one
/// [`Token::Eof`]. Lexical errors never abort the scan; they accumulate in
/// the returned diagnostics list and scanning resumes after the offending
/// text, so a single run can report several independent errors.
///
/// `Tailor["path"]` inclusions are resolved here: the fragment file
/// (`path` + `.lor`) is read and scanned in place, splicing its tokens into
/// the same sequence before the including source resumes. Fragments cannot
/// themselves include fragments.
///
/// # Parameters
/// - `source`: The raw source text.
///
/// # Returns
/// The `(Token, line)` sequence and any lexical diagnostics.
#[must_use]
pub fn scan_tokens(source: &str) -> (Vec<(Token, usize)>, Vec<ParseError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    scan_into(source, 0, &mut tokens, &mut errors);

    let line = tokens.last().map_or(1, |(_, line)| *line);
    tokens.push((Token::Eof, line));
    (tokens, errors)
}

/// Runs the scan loop over one source buffer, appending into a shared token
/// sequence.
///
/// `depth` is 0 for the top-level source and 1 inside an included fragment;
/// inclusion state lives on the call stack, so resuming the including source
/// after a fragment needs no explicit save/restore.
fn scan_into(source: &str,
             depth: usize,
             tokens: &mut Vec<(Token, usize)>,
             errors: &mut Vec<ParseError>) {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(Token::Tailor) => scan_fragment(&mut lexer, depth, tokens, errors),
            Ok(token) => tokens.push((token, line)),
            Err(error) => errors.push(diagnostic(error, lexer.slice(), line)),
        }
    }
}

/// Handles a `Tailor["path"]` inclusion from inside the scan loop.
///
/// Consumes the bracketed path from the active lexer, reads the fragment
/// file, and splices its token stream into the shared sequence. Missing
/// files and nesting attempts are reported as diagnostics and the including
/// source continues scanning immediately after the closing bracket.
fn scan_fragment(lexer: &mut logos::Lexer<Token>,
                 depth: usize,
                 tokens: &mut Vec<(Token, usize)>,
                 errors: &mut Vec<ParseError>) {
    let line = lexer.extras.line;

    match lexer.next() {
        Some(Ok(Token::LBracket)) => {},
        _ => {
            errors.push(ParseError::ExpectedFragmentPath { line });
            return;
        },
    }
    let path = match lexer.next() {
        Some(Ok(Token::Str(path))) => path,
        _ => {
            errors.push(ParseError::ExpectedFragmentPath { line });
            return;
        },
    };
    match lexer.next() {
        Some(Ok(Token::RBracket)) => {},
        _ => {
            errors.push(ParseError::ExpectedFragmentPath { line });
            return;
        },
    }

    if depth > 0 {
        errors.push(ParseError::NestedFragment { line });
        return;
    }

    let file = format!("{path}{FRAGMENT_EXTENSION}");
    match fs::read_to_string(&file) {
        Ok(contents) => scan_into(&contents, depth + 1, tokens, errors),
        Err(_) => errors.push(ParseError::FragmentNotFound { path: file, line }),
    }
}

/// Builds a full diagnostic from a scanner failure.
fn diagnostic(error: LexicalError, slice: &str, line: usize) -> ParseError {
    match error {
        LexicalError::UnexpectedCharacter => {
            ParseError::UnexpectedCharacter { lexeme: slice.to_string(),
                                              line }
        },
        LexicalError::UnterminatedString => ParseError::UnterminatedString { line },
        LexicalError::UnterminatedComment => ParseError::UnterminatedComment { line },
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "\"{s}\""),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::Func => "Define",
            Self::Input => "Mine",
            Self::If => "When",
            Self::Else => "Thats",
            Self::Elif => "Then",
            Self::Loop => "AllTooWhile",
            Self::Nil => "BlankSpace",
            Self::True => "The1",
            Self::False => "The0",
            Self::Print => "SpeakNow",
            Self::Return => "BackTo",
            Self::Continue => "Evermore",
            Self::Clear => "Clean",
            Self::Switch => "Dear",
            Self::Case => "John",
            Self::Default => "Closure",
            Self::Var => "Let",
            Self::Try => "Fear",
            Self::Catch => "Less",
            Self::Tailor => "Tailor",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::LessThan => "<",
            Self::LessEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterEqual => ">=",
            Self::PlusEqual => "+=",
            Self::MinusEqual => "-=",
            Self::StarEqual => "*=",
            Self::SlashEqual => "/=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Comment | Self::MultiLineComment | Self::NewLine | Self::Ignored => "",
            Self::Eof => "end",
        };
        write!(f, "{text}")
    }
}
