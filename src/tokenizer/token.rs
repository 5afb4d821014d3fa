use std::fmt;

use strum_macros::{Display, EnumIter};

use super::symbol::{parse_lexeme_with, Classifier};
use crate::config::TokenizerConfig;

/// Classification of a single lexeme.
///
/// Every byte of the input maps to exactly one kind through [`TokenKind::from_byte`].
/// Bytes that are not punctuation are merged into [`TokenKind::Symbol`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TokenKind {
    Dot,
    Comma,
    Colon,
    Quote,
    Slash,
    Asterisk,
    Space,
    Equals,
    NewLine,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    Symbol,
}

impl TokenKind {
    /// Fixed byte classification table. Only `' '` is a space; tabs, carriage returns and
    /// every other unlisted byte are symbol bytes.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'\'' => TokenKind::Quote,
            b'/' => TokenKind::Slash,
            b'*' => TokenKind::Asterisk,
            b' ' => TokenKind::Space,
            b'=' => TokenKind::Equals,
            b'\n' => TokenKind::NewLine,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            _ => TokenKind::Symbol,
        }
    }

    /// [`TokenKind::from_byte`] with tabs and carriage returns folded into
    /// [`TokenKind::Space`].
    pub fn from_byte_folded(byte: u8) -> Self {
        match byte {
            b'\t' | b'\r' => TokenKind::Space,
            _ => TokenKind::from_byte(byte),
        }
    }

    /// The canonical character of a punctuation kind, `None` for symbols.
    pub fn as_char(self) -> Option<char> {
        match self {
            TokenKind::Dot => Some('.'),
            TokenKind::Comma => Some(','),
            TokenKind::Colon => Some(':'),
            TokenKind::Quote => Some('\''),
            TokenKind::Slash => Some('/'),
            TokenKind::Asterisk => Some('*'),
            TokenKind::Space => Some(' '),
            TokenKind::Equals => Some('='),
            TokenKind::NewLine => Some('\n'),
            TokenKind::OpenBracket => Some('['),
            TokenKind::CloseBracket => Some(']'),
            TokenKind::OpenCurly => Some('{'),
            TokenKind::CloseCurly => Some('}'),
            TokenKind::Symbol => None,
        }
    }

    pub fn is_symbol(self) -> bool {
        self == TokenKind::Symbol
    }

    /// Whether a token of this kind can begin a value.
    pub fn starts_value(self) -> bool {
        matches!(
            self,
            TokenKind::OpenBracket | TokenKind::OpenCurly | TokenKind::Quote | TokenKind::Symbol
        )
    }
}

impl From<u8> for TokenKind {
    fn from(byte: u8) -> Self {
        TokenKind::from_byte(byte)
    }
}

/// Source location of a token.
///
/// `line` is 1-based, `column` is a 0-based byte offset into the line and
/// `length` is the number of bytes the token spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, length: usize) -> Self {
        Self {
            line,
            column,
            length,
        }
    }

    /// Column right after the last byte of the token.
    pub fn end(&self) -> usize {
        self.column + self.length
    }

    /// True when `next` starts exactly where this position ends, on the same line.
    pub fn is_adjacent_to(&self, next: &Position) -> bool {
        self.line == next.line && self.end() == next.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.column, self.length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::NewLine => write!(f, "\\n"),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Byte-oriented tokenizer tracking line and column while scanning.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_config(TokenizerConfig::default())
    }

    pub fn with_config(config: TokenizerConfig) -> Self {
        Self {
            config,
            current_line: 1,   // 1-based
            current_column: 0, // 0-based
        }
    }

    /// Splits `input` into classified tokens. Never fails: every byte ends up in some token.
    #[tracing::instrument(level = "debug", skip(self, input), fields(bytes = input.len()))]
    pub fn tokenize(&mut self, input: &[u8]) -> Vec<Token> {
        let classify: Classifier = if self.config.fold_whitespace {
            TokenKind::from_byte_folded
        } else {
            TokenKind::from_byte
        };
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let (rest, kind, lexeme) = match parse_lexeme_with(classify, remaining) {
                Ok((rest, (kind, lexeme))) => (rest, kind, lexeme),
                Err(e) => {
                    // Unreachable with the fallback lexeme parser; keep the bytes anyway.
                    tracing::error!("lexeme parser rejected input: {:?}", e);
                    (&remaining[remaining.len()..], TokenKind::Symbol, remaining)
                }
            };

            let position = Position::new(self.current_line, self.current_column, lexeme.len());
            tokens.push(Token::new(
                kind,
                String::from_utf8_lossy(lexeme).into_owned(),
                position,
            ));
            self.advance(kind, lexeme.len());

            remaining = rest;
        }

        tracing::debug!("produced {} tokens", tokens.len());
        tokens
    }

    fn advance(&mut self, kind: TokenKind, length: usize) {
        if kind == TokenKind::NewLine {
            self.current_line += 1;
            self.current_column = 0;
        } else {
            self.current_column += length;
        }
    }
}

/// Tokenizes a whole buffer with a fresh [`Tokenizer`].
pub fn tokenize(buffer: &[u8]) -> Vec<Token> {
    Tokenizer::new().tokenize(buffer)
}
