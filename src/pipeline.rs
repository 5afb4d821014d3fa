//! The three stages chained together.

use std::path::Path;

use tracing::{debug, info};

use crate::{
    analyzer::{self, Parser},
    ast::Ast,
    config::KfgConfig,
    error::KfgResult,
    preprocessor::{LexicalFilter, Preprocessor},
    tokenizer::token::{Token, Tokenizer},
};

/// Tokenizes `source` and filters out comments and whitespace.
pub fn lex(source: &[u8]) -> Vec<Token> {
    lex_with(source, &KfgConfig::default())
}

pub fn lex_with(source: &[u8], config: &KfgConfig) -> Vec<Token> {
    let tokens = Tokenizer::with_config(config.tokenizer).tokenize(source);
    LexicalFilter::new(config.filter).process(tokens)
}

/// Runs tokenizer, lexical filter and parser over a complete buffer.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse_source(source: &[u8], config: &KfgConfig) -> KfgResult<Ast> {
    debug!("Tokenizing");
    let tokens = Tokenizer::with_config(config.tokenizer).tokenize(source);

    debug!("Lexing {} tokens", tokens.len());
    let tokens = LexicalFilter::new(config.filter).process(tokens);

    debug!("Parsing {} tokens", tokens.len());
    let (_, ast) = analyzer::RootParser::new(config.parser).parse(&tokens, 0)?;
    Ok(ast)
}

/// [`parse_source`] with the default configuration.
pub fn parse_str(source: &str) -> KfgResult<Ast> {
    parse_source(source.as_bytes(), &KfgConfig::default())
}

/// Reads and parses a whole file.
pub fn parse_file(path: impl AsRef<Path>, config: &KfgConfig) -> KfgResult<Ast> {
    let path = path.as_ref();
    info!("Reading {}", path.display());
    let source = std::fs::read(path)?;
    parse_source(&source, config)
}
