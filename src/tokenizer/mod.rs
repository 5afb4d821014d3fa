//! # Tokenizer Component
//!
//! First stage of the KFG pipeline: turns a raw byte buffer into a flat sequence of
//! classified [`Token`](token::Token)s.
//!
//! ## Design Principles
//!
//! * **Total**: tokenizing never fails. Bytes that are not punctuation are merged into
//!   symbol runs, so any buffer produces a token sequence.
//! * **Positioned**: each token records its line (1-based), column (0-based byte offset)
//!   and length, which later stages use for adjacency checks and error reporting.
//! * **Lossless**: whitespace, newlines and comment delimiters are all emitted as tokens.
//!   Removing them is the job of the [`preprocessor`](crate::preprocessor).
//!
//! ## Component Structure
//!
//! * [`token`]: token types and the [`Tokenizer`](token::Tokenizer) driver
//! * [`symbol`]: `nom` parsers recognizing a single lexeme
//!
//! ## Usage Example
//!
//! ```rust
//! use kfg::tokenizer::token::{tokenize, TokenKind};
//!
//! let tokens = tokenize(b"port = 8080");
//! assert_eq!(tokens[0].kind, TokenKind::Symbol);
//! assert_eq!(tokens[0].text, "port");
//! ```

pub mod symbol;
pub mod token;

pub use token::{tokenize, Position, Token, TokenKind, Tokenizer};
