//! # Lexeme Recognition
//!
//! Byte-level `nom` parsers used by the [`Tokenizer`](super::token::Tokenizer).
//!
//! A lexeme is either a maximal run of symbol bytes or a single punctuation byte.
//! Since every byte falls in one of the two classes, [`parse_lexeme`] succeeds on any
//! non-empty input. [`parse_lexeme_with`] takes the classification as a parameter so the
//! tokenizer can fold tabs and carriage returns into spaces.

use nom::{
    branch::alt,
    bytes::complete::{take, take_while1},
    combinator::map,
    IResult,
};

use super::token::TokenKind;

pub type ParserResult<'a, T> = IResult<&'a [u8], T>;

/// Byte classification used while scanning, [`TokenKind::from_byte`] unless whitespace
/// folding is enabled.
pub type Classifier = fn(u8) -> TokenKind;

/// Greedily consumes consecutive symbol bytes.
pub fn parse_symbol_run(input: &[u8]) -> ParserResult<(TokenKind, &[u8])> {
    symbol_run(TokenKind::from_byte)(input)
}

/// Consumes exactly one byte and classifies it.
pub fn parse_punctuation(input: &[u8]) -> ParserResult<(TokenKind, &[u8])> {
    punctuation(TokenKind::from_byte)(input)
}

pub fn parse_lexeme(input: &[u8]) -> ParserResult<(TokenKind, &[u8])> {
    parse_lexeme_with(TokenKind::from_byte, input)
}

/// [`parse_lexeme`] with a custom byte classification.
pub fn parse_lexeme_with(classify: Classifier, input: &[u8]) -> ParserResult<(TokenKind, &[u8])> {
    alt((symbol_run(classify), punctuation(classify)))(input)
}

fn symbol_run<'a>(
    classify: Classifier,
) -> impl FnMut(&'a [u8]) -> ParserResult<'a, (TokenKind, &'a [u8])> {
    map(
        take_while1(move |byte: u8| classify(byte).is_symbol()),
        |run: &'a [u8]| (TokenKind::Symbol, run),
    )
}

fn punctuation<'a>(
    classify: Classifier,
) -> impl FnMut(&'a [u8]) -> ParserResult<'a, (TokenKind, &'a [u8])> {
    map(take(1usize), move |byte: &'a [u8]| {
        let kind = byte.first().copied().map_or(TokenKind::Symbol, classify);
        (kind, byte)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_run() {
        let (rest, (kind, run)) = parse_symbol_run(b"abc=1").unwrap();
        assert_eq!(kind, TokenKind::Symbol);
        assert_eq!(run, b"abc");
        assert_eq!(rest, b"=1");
    }

    #[test]
    fn test_symbol_run_rejects_punctuation() {
        assert!(parse_symbol_run(b".abc").is_err());
    }

    #[test]
    fn test_lexeme_falls_back_to_punctuation() {
        let (rest, (kind, lexeme)) = parse_lexeme(b"::a").unwrap();
        assert_eq!(kind, TokenKind::Colon);
        assert_eq!(lexeme, b":");
        assert_eq!(rest, b":a");
    }

    #[test]
    fn test_tab_joins_symbol_run() {
        let (rest, (kind, run)) = parse_lexeme(b"a\tb\r=").unwrap();
        assert_eq!(kind, TokenKind::Symbol);
        assert_eq!(run, b"a\tb\r");
        assert_eq!(rest, b"=");
    }

    #[test]
    fn test_folding_classifier_splits_on_tab() {
        let (rest, (kind, run)) = parse_lexeme_with(TokenKind::from_byte_folded, b"a\tb").unwrap();
        assert_eq!((kind, run), (TokenKind::Symbol, &b"a"[..]));

        let (rest, (kind, run)) = parse_lexeme_with(TokenKind::from_byte_folded, rest).unwrap();
        assert_eq!((kind, run), (TokenKind::Space, &b"\t"[..]));
        assert_eq!(rest, b"b");
    }

    #[test]
    fn test_lexeme_on_empty_input() {
        assert!(parse_lexeme(b"").is_err());
    }
}
