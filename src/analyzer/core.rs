//! # Core Parser Definitions
//!
//! The parser interface shared by every KFG sub-parser and the error type they report.

use thiserror::Error;

use crate::tokenizer::token::{Position, Token};

/// Parser trait defines the core parsing interface.
///
/// A parser receives the whole token slice and the index to start from. It returns the
/// index of the first token it did not consume together with the parsed value.
///
/// # Type Parameters
///
/// * `I` - The input token type
/// * `O` - The output value type
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

/// On success, the new position and the parsed value.
pub type ParseResult<O> = Result<(usize, O), ParseError>;

/// Syntax errors. Every variant carries the offending token so callers can point into
/// the source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing declaration after symbol '{token}' at {}", .token.position)]
    MissingDeclaration { token: Token },

    #[error("missing value after key '{token}' at {}", .token.position)]
    MissingValue { token: Token },

    #[error("missing symbol ':' after '{token}' at {}", .token.position)]
    MissingColon { token: Token },

    #[error("unexpected {} '{token}' at {}, expected {expected}", .token.kind, .token.position)]
    UnexpectedToken { token: Token, expected: String },

    #[error("{}s are only allowed inside dictionaries, found at {}", .token.kind, .token.position)]
    MisplacedDot { token: Token },

    #[error("'{literal}' not a number at {}", .token.position)]
    InvalidNumber { literal: String, token: Token },

    #[error("missing decimal part of float value at {}", .token.position)]
    MissingDecimal { token: Token },

    #[error("broken string at {}", .token.position)]
    BrokenString { token: Token },

    #[error("unclosed string at {}", .token.position)]
    UnclosedString { token: Token },

    #[error("unclosed array at {}", .token.position)]
    UnclosedArray { token: Token },

    #[error("unclosed dict at {}", .token.position)]
    UnclosedDict { token: Token },

    #[error("nested declarations are not allowed inside dictionaries, found at {}", .token.position)]
    NestedDeclaration { token: Token },

    #[error("unexpected end of input{}", eof_suffix(.after))]
    UnexpectedEof { after: Option<Token> },
}

impl ParseError {
    pub(crate) fn eof(input: &[Token]) -> Self {
        ParseError::UnexpectedEof {
            after: input.last().cloned(),
        }
    }

    pub(crate) fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            token: token.clone(),
            expected: expected.into(),
        }
    }

    /// The token the error points at.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::MissingDeclaration { token }
            | ParseError::MissingValue { token }
            | ParseError::MissingColon { token }
            | ParseError::UnexpectedToken { token, .. }
            | ParseError::MisplacedDot { token }
            | ParseError::InvalidNumber { token, .. }
            | ParseError::MissingDecimal { token }
            | ParseError::BrokenString { token }
            | ParseError::UnclosedString { token }
            | ParseError::UnclosedArray { token }
            | ParseError::UnclosedDict { token }
            | ParseError::NestedDeclaration { token } => Some(token),
            ParseError::UnexpectedEof { after } => after.as_ref(),
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.token().map(|token| token.position)
    }

    /// Errors confined to a single scalar. Lenient collections drop the scalar and go on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::InvalidNumber { .. } | ParseError::MissingDecimal { .. }
        )
    }
}

fn eof_suffix(after: &Option<Token>) -> String {
    match after {
        Some(token) => format!(" after '{}' at {}", token, token.position),
        None => String::new(),
    }
}
