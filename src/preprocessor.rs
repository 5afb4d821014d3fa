//! # KFG Preprocessor
//!
//! The lexical filter sitting between the tokenizer and the parser:
//!
//! ```text
//! Bytes → Tokenizer → Preprocessor → Parser → Ast
//! ```
//!
//! It removes
//!
//! * line comments (`// ...` up to and including the newline),
//! * block comments (`/* ... */`, not nested, may span lines),
//! * insignificant whitespace.
//!
//! Kept tokens retain their order and positions. Filtering never fails; malformed input
//! is left for the parser to report.
//!
//! ## Quoted content
//!
//! With [`FilterConfig::protect_strings`] enabled (the default) a quote switches the filter
//! into string mode, in which spaces and comment markers are kept verbatim. String mode
//! ends at the next quote or newline. With it disabled, spaces inside quotes are stripped
//! like any other whitespace.

use tracing::{debug, trace};

use crate::{
    config::FilterConfig,
    tokenizer::token::{Token, TokenKind},
};

/// A trait for preprocessing different types of input
pub trait Preprocessor<T, U = T> {
    /// Process the input of type T and return the processed result
    fn process(&self, input: T) -> U;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    LineComment,
    BlockComment,
    String,
}

/// Comment and whitespace stripping pass over a token stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalFilter {
    config: FilterConfig,
}

impl LexicalFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }
}

impl Preprocessor<Vec<Token>> for LexicalFilter {
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = input.len()))]
    fn process(&self, input: Vec<Token>) -> Vec<Token> {
        let kinds: Vec<TokenKind> = input.iter().map(|token| token.kind).collect();
        let mut output = Vec::with_capacity(input.len());
        let mut mode = Mode::Code;

        for (i, token) in input.into_iter().enumerate() {
            match mode {
                Mode::LineComment => {
                    if token.kind == TokenKind::NewLine {
                        mode = Mode::Code;
                    }
                    continue;
                }
                Mode::BlockComment => {
                    // `*/` does not close when a slash precedes the asterisk, so `/*/` stays open
                    if token.kind == TokenKind::Slash
                        && kinds[i - 1] == TokenKind::Asterisk
                        && kinds[i - 2] != TokenKind::Slash
                    {
                        trace!("block comment closed at {}", token.position);
                        mode = Mode::Code;
                    }
                    continue;
                }
                Mode::Code if token.kind == TokenKind::Slash => {
                    match kinds.get(i + 1) {
                        Some(TokenKind::Slash) => {
                            trace!("line comment at {}", token.position);
                            mode = Mode::LineComment;
                            continue;
                        }
                        Some(TokenKind::Asterisk) => {
                            trace!("block comment at {}", token.position);
                            mode = Mode::BlockComment;
                            continue;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }

            if self.config.protect_strings {
                mode = match (mode, token.kind) {
                    (Mode::Code, TokenKind::Quote) => Mode::String,
                    (Mode::String, TokenKind::Quote | TokenKind::NewLine) => Mode::Code,
                    (mode, _) => mode,
                };
            }

            if token.kind == TokenKind::Space && mode != Mode::String {
                continue;
            }

            output.push(token);
        }

        debug!("kept {} tokens", output.len());
        output
    }
}

/// Filters `tokens` with the default configuration.
pub fn filter(tokens: Vec<Token>) -> Vec<Token> {
    LexicalFilter::default().process(tokens)
}
