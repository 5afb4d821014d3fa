//! # Analyzer
//!
//! Recursive-descent parser turning a filtered token sequence into an [`Ast`].
//!
//! Every sub-parser implements [`Parser`]: it takes the whole token slice plus a start
//! index and returns the index after the last consumed token together with its value.
//! The first error aborts the parse.
//!
//! ```rust
//! use kfg::{analyzer, preprocessor, tokenizer, Node};
//!
//! let tokens = preprocessor::filter(tokenizer::tokenize(b"x = [1, 2]"));
//! let ast = analyzer::parse(&tokens).unwrap();
//! assert_eq!(ast.get("x"), Some(&Node::from(vec![1i64, 2])));
//! ```

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use self::core::{ParseError, ParseResult, Parser};
pub use parsers::RootParser;

use crate::{ast::Ast, config::ParserConfig, tokenizer::token::Token};

/// Parses `tokens` with the default configuration.
pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    parse_with(tokens, ParserConfig::default())
}

pub fn parse_with(tokens: &[Token], config: ParserConfig) -> Result<Ast, ParseError> {
    RootParser::new(config)
        .parse(tokens, 0)
        .map(|(_, ast)| ast)
}
