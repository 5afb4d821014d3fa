use std::collections::BTreeMap;

use tracing::trace;

use super::super::{core::*, prelude::*};
use super::tolerate;
use crate::{
    ast::Node,
    config::ParserConfig,
    tokenizer::token::{Token, TokenKind},
};

/// Dispatches on the first token: `[` array, `{` dict, `'` string, symbol scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueParser {
    config: ParserConfig,
}

impl ValueParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl Parser<Token, Node> for ValueParser {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Node> {
        let token = input.get(pos).ok_or_else(|| ParseError::eof(input))?;
        match token.kind {
            TokenKind::OpenBracket => ArrayParser::new(self.config).parse(input, pos),
            TokenKind::OpenCurly => DictParser::new(self.config).parse(input, pos),
            TokenKind::Quote => StringParser.parse(input, pos),
            TokenKind::Symbol => ScalarParser.parse(input, pos),
            _ => Err(ParseError::unexpected(token, "a value")),
        }
    }
}

/// Quoted string. Tokens up to the closing quote are concatenated verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl Parser<Token, Node> for StringParser {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Node> {
        let (mut pos, opening) = expect(TokenKind::Quote).parse(input, pos)?;
        let mut text = String::new();

        loop {
            match input.get(pos) {
                None => return Err(ParseError::UnclosedString { token: opening }),
                Some(token) if token.is(TokenKind::Quote) => {
                    return Ok((pos + 1, Node::String(text)));
                }
                Some(token) if token.is(TokenKind::NewLine) => {
                    return Err(ParseError::BrokenString {
                        token: token.clone(),
                    });
                }
                Some(token) => {
                    text.push_str(&token.text);
                    pos += 1;
                }
            }
        }
    }
}

/// Integer, float or bool literal starting at a symbol.
///
/// A float is written as an integer symbol, a dot and a symbol starting with a digit, all
/// three touching in the source. A dot separated by whitespace is left for the caller, so
/// `{.a: 1 .b: 2}` reads as two entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarParser;

impl Parser<Token, Node> for ScalarParser {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Node> {
        let (next, token) = expect(TokenKind::Symbol).parse(input, pos)?;
        let text = token.text.as_str();

        if is_decimal_integer(text) {
            if let Some(dot) = input
                .get(next)
                .filter(|dot| dot.is(TokenKind::Dot) && token.position.is_adjacent_to(&dot.position))
            {
                match input.get(next + 1) {
                    Some(fraction)
                        if fraction.is(TokenKind::Symbol)
                            && dot.position.is_adjacent_to(&fraction.position) =>
                    {
                        if fraction.text.starts_with(|c: char| c.is_ascii_digit()) {
                            let literal = format!("{}.{}", text, fraction.text);
                            trace!("float literal {} at {}", literal, token.position);
                            return match literal.parse::<f64>() {
                                Ok(value) => Ok((next + 2, Node::Float(value))),
                                Err(_) => Err(ParseError::InvalidNumber {
                                    literal,
                                    token: token.clone(),
                                }),
                            };
                        }
                        // `1.key`: the dot belongs to the next dict entry
                    }
                    _ => {
                        return Err(ParseError::MissingDecimal { token: dot.clone() });
                    }
                }
            }
        }

        if let Some(value) = parse_integer(text) {
            return Ok((next, Node::Integer(value)));
        }

        match text {
            "true" => Ok((next, Node::Bool(true))),
            "false" => Ok((next, Node::Bool(false))),
            _ => Err(ParseError::InvalidNumber {
                literal: text.to_string(),
                token,
            }),
        }
    }
}

/// `[value ...]`. Commas and newlines between items are separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayParser {
    config: ParserConfig,
}

impl ArrayParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl Parser<Token, Node> for ArrayParser {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Node> {
        let (mut pos, opening) = expect(TokenKind::OpenBracket).parse(input, pos)?;
        let value = ValueParser::new(self.config);
        let mut items = Vec::new();

        loop {
            let Some(token) = input.get(pos) else {
                return Err(ParseError::UnclosedArray { token: opening });
            };

            match token.kind {
                TokenKind::CloseBracket => return Ok((pos + 1, Node::Array(items))),
                TokenKind::Comma | TokenKind::NewLine => pos += 1,
                kind if kind.starts_value() => match value.parse(input, pos) {
                    Ok((next, node)) => {
                        items.push(node);
                        pos = next;
                    }
                    Err(e) if e.is_recoverable() => {
                        tolerate(self.config.strictness, e)?;
                        pos = literal_end(input, pos);
                    }
                    Err(e) => return Err(e),
                },
                _ => {
                    tolerate(
                        self.config.strictness,
                        ParseError::unexpected(token, "a value or ']'"),
                    )?;
                    pos += 1;
                }
            }
        }
    }
}

/// `{.key: value ...}`. Commas and newlines between entries are separators; a repeated
/// key keeps the last value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictParser {
    config: ParserConfig,
}

impl DictParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl Parser<Token, Node> for DictParser {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Node> {
        let (mut pos, opening) = expect(TokenKind::OpenCurly).parse(input, pos)?;
        let value = ValueParser::new(self.config);
        let entry_key = map(
            tuple2(
                preceded(expect(TokenKind::Dot), expect(TokenKind::Symbol)),
                expect(TokenKind::Colon),
            ),
            |(key, _colon): (Token, Token)| key,
        );
        let unclosed = || ParseError::UnclosedDict {
            token: opening.clone(),
        };
        let mut entries = BTreeMap::new();

        loop {
            let Some(token) = input.get(pos) else {
                return Err(unclosed());
            };

            match token.kind {
                TokenKind::CloseCurly => return Ok((pos + 1, Node::Dict(entries))),
                TokenKind::Comma | TokenKind::NewLine => pos += 1,
                TokenKind::Dot => {
                    let (next, key) = entry_key.parse(input, pos).map_err(|e| match e {
                        ParseError::UnexpectedEof { .. } => unclosed(),
                        e => e,
                    })?;
                    pos = next;

                    let Some(first) = input.get(pos) else {
                        return Err(unclosed());
                    };
                    if first.is(TokenKind::Colon) {
                        return Err(ParseError::NestedDeclaration {
                            token: first.clone(),
                        });
                    }
                    if !first.kind.starts_value() {
                        // leave the token for the loop: `}` closes, anything else is stray
                        tolerate(
                            self.config.strictness,
                            ParseError::MissingValue { token: key },
                        )?;
                        continue;
                    }

                    match value.parse(input, pos) {
                        Ok((next, node)) => {
                            entries.insert(key.text, node);
                            pos = next;
                        }
                        Err(e) if e.is_recoverable() => {
                            tolerate(self.config.strictness, e)?;
                            pos = literal_end(input, pos);
                        }
                        Err(e) => return Err(e),
                    }
                }
                _ => {
                    tolerate(
                        self.config.strictness,
                        ParseError::unexpected(token, "'.' or '}'"),
                    )?;
                    pos += 1;
                }
            }
        }
    }
}

/// Index just past the rejected literal at `pos`, so recovery resumes after it.
///
/// Covers what [`ScalarParser`] looked at: the symbol, then for a decimal integer a touching
/// dot and a touching digit-led fraction. `1.` skips two tokens, `1.5x` three.
fn literal_end(input: &[Token], pos: usize) -> usize {
    let Some(token) = input.get(pos) else {
        return pos + 1;
    };
    if !token.is(TokenKind::Symbol) || !is_decimal_integer(&token.text) {
        return pos + 1;
    }
    let Some(dot) = input
        .get(pos + 1)
        .filter(|dot| dot.is(TokenKind::Dot) && token.position.is_adjacent_to(&dot.position))
    else {
        return pos + 1;
    };
    match input.get(pos + 2) {
        Some(fraction)
            if fraction.is(TokenKind::Symbol)
                && dot.position.is_adjacent_to(&fraction.position) =>
        {
            if fraction.text.starts_with(|c: char| c.is_ascii_digit()) {
                pos + 3
            } else {
                pos + 1
            }
        }
        _ => pos + 2,
    }
}

/// Decimal digits with an optional sign.
fn is_decimal_integer(text: &str) -> bool {
    let digits = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Signed decimal, `0x` hexadecimal, `0o` octal or `0b` binary integer.
fn parse_integer(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::Strictness, preprocessor::filter, tokenizer::token::tokenize};

    fn lex(source: &str) -> Vec<Token> {
        filter(tokenize(source.as_bytes()))
    }

    fn value(source: &str) -> ParseResult<Node> {
        ValueParser::default().parse(&lex(source), 0)
    }

    fn strict_value(source: &str) -> ParseResult<Node> {
        ValueParser::new(ParserConfig::strict()).parse(&lex(source), 0)
    }

    fn dict(entries: Vec<(&str, Node)>) -> Node {
        entries.into_iter().collect()
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(value("42"), Ok((1, Node::Integer(42))));
        assert_eq!(value("-7"), Ok((1, Node::Integer(-7))));
        assert_eq!(value("+3"), Ok((1, Node::Integer(3))));
        assert_eq!(value("0x1F"), Ok((1, Node::Integer(31))));
        assert_eq!(value("0o17"), Ok((1, Node::Integer(15))));
        assert_eq!(value("-0b101"), Ok((1, Node::Integer(-5))));
        assert_eq!(
            value("-9223372036854775808"),
            Ok((1, Node::Integer(i64::MIN)))
        );
    }

    #[test]
    fn test_integer_rejects() {
        assert_eq!(parse_integer("9223372036854775808"), None);
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("0x+1"), None);
        assert_eq!(parse_integer("1_000"), None);
        assert_eq!(parse_integer("--1"), None);
        assert!(matches!(
            value("12abc"),
            Err(ParseError::InvalidNumber { ref literal, .. }) if literal == "12abc"
        ));
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(value("1.5"), Ok((3, Node::Float(1.5))));
        assert_eq!(value("-0.25"), Ok((3, Node::Float(-0.25))));
        assert_eq!(value("2.5e3"), Ok((3, Node::Float(2500.0))));
    }

    #[test]
    fn test_float_errors() {
        assert!(matches!(value("1."), Err(ParseError::MissingDecimal { .. })));
        assert!(matches!(value("1.]"), Err(ParseError::MissingDecimal { .. })));
        assert!(matches!(
            value("1.5x"),
            Err(ParseError::InvalidNumber { ref literal, .. }) if literal == "1.5x"
        ));
    }

    #[test]
    fn test_dot_after_integer_is_left_alone() {
        // separated by a space
        assert_eq!(value("1 .b"), Ok((1, Node::Integer(1))));
        // followed by a key
        assert_eq!(value("1.b"), Ok((1, Node::Integer(1))));
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(value("true"), Ok((1, Node::Bool(true))));
        assert_eq!(value("false"), Ok((1, Node::Bool(false))));
        assert!(matches!(value("True"), Err(ParseError::InvalidNumber { .. })));
        assert!(matches!(value("null"), Err(ParseError::InvalidNumber { .. })));
    }

    #[test]
    fn test_string() {
        assert_eq!(value("'hi'"), Ok((3, Node::String("hi".into()))));
        assert_eq!(value("''"), Ok((2, Node::String(String::new()))));
        assert_eq!(
            value("'a: [b], {c}.d = /e'").map(|(_, node)| node),
            Ok(Node::String("a: [b], {c}.d = /e".into()))
        );
    }

    #[test]
    fn test_string_errors() {
        let tokens = lex("'abc");
        assert_eq!(
            StringParser.parse(&tokens, 0),
            Err(ParseError::UnclosedString {
                token: tokens[0].clone()
            })
        );

        let tokens = lex("'abc\ndef'");
        assert_eq!(
            StringParser.parse(&tokens, 0),
            Err(ParseError::BrokenString {
                token: tokens[2].clone()
            })
        );
    }

    #[test]
    fn test_array() {
        let expected = Node::from(vec![1i64, 2, 3]);
        assert_eq!(value("[1 2 3]").map(|(_, n)| n), Ok(expected.clone()));
        assert_eq!(value("[1, 2, 3]").map(|(_, n)| n), Ok(expected.clone()));
        assert_eq!(value("[\n  1,\n  2\n  3,\n]").map(|(_, n)| n), Ok(expected));
        assert_eq!(value("[]"), Ok((2, Node::Array(vec![]))));
    }

    #[test]
    fn test_nested_array() {
        assert_eq!(
            value("[[1] {.a: 'x'} 'y' 0.5]").map(|(_, n)| n),
            Ok(Node::Array(vec![
                Node::from(vec![1i64]),
                dict(vec![("a", "x".into())]),
                "y".into(),
                Node::Float(0.5),
            ]))
        );
    }

    #[test]
    fn test_unclosed_array() {
        let tokens = lex("[1 2");
        assert_eq!(
            ValueParser::default().parse(&tokens, 0),
            Err(ParseError::UnclosedArray {
                token: tokens[0].clone()
            })
        );
        assert!(matches!(value("[1 [2]"), Err(ParseError::UnclosedArray { .. })));
    }

    #[test]
    fn test_lenient_array_drops_invalid_items() {
        assert_eq!(
            value("[1 oops = 2 1. 3]").map(|(_, n)| n),
            Ok(Node::from(vec![1i64, 2, 3]))
        );
    }

    #[test]
    fn test_lenient_array_skips_whole_float_literal() {
        assert_eq!(
            value("[1.5x 2]").map(|(_, n)| n),
            Ok(Node::from(vec![2i64]))
        );
        assert_eq!(
            value("[1. 2]").map(|(_, n)| n),
            Ok(Node::from(vec![2i64]))
        );
    }

    #[test]
    fn test_strict_array_rejects_invalid_items() {
        assert!(matches!(
            strict_value("[1 oops]"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            strict_value("[1 = 2]"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert_eq!(
            strict_value("[1, 2]").map(|(_, n)| n),
            Ok(Node::from(vec![1i64, 2]))
        );
    }

    #[test]
    fn test_dict() {
        assert_eq!(
            value("{.a: 1 .b: 'two'}").map(|(_, n)| n),
            Ok(dict(vec![("a", 1i64.into()), ("b", "two".into())]))
        );
        assert_eq!(
            value("{.a: 1.5, .b: [true]\n.c: {.d: 2}}").map(|(_, n)| n),
            Ok(dict(vec![
                ("a", Node::Float(1.5)),
                ("b", Node::from(vec![true])),
                ("c", dict(vec![("d", 2i64.into())])),
            ]))
        );
        assert_eq!(value("{}"), Ok((2, Node::Dict(BTreeMap::new()))));
    }

    #[test]
    fn test_dict_integer_followed_by_key() {
        assert_eq!(
            value("{.a: 1.b: 2}").map(|(_, n)| n),
            Ok(dict(vec![("a", 1i64.into()), ("b", 2i64.into())]))
        );
    }

    #[test]
    fn test_dict_duplicate_key_keeps_last() {
        assert_eq!(
            value("{.a: 1 .a: 2}").map(|(_, n)| n),
            Ok(dict(vec![("a", 2i64.into())]))
        );
    }

    #[test]
    fn test_dict_nested_declaration() {
        assert!(matches!(
            value("{.a: :b}"),
            Err(ParseError::NestedDeclaration { .. })
        ));
        // also in lenient mode
        assert!(matches!(
            ValueParser::new(ParserConfig {
                strictness: Strictness::Lenient,
                ..ParserConfig::default()
            })
            .parse(&lex("{.a:: 1}"), 0),
            Err(ParseError::NestedDeclaration { .. })
        ));
    }

    #[test]
    fn test_dict_malformed_entry() {
        assert!(matches!(
            value("{.: 1}"),
            Err(ParseError::UnexpectedToken { ref expected, .. }) if expected == "Symbol"
        ));
        assert!(matches!(
            value("{.a 1}"),
            Err(ParseError::UnexpectedToken { ref expected, .. }) if expected == "Colon"
        ));
    }

    #[test]
    fn test_unclosed_dict() {
        let tokens = lex("{.a: 1");
        assert_eq!(
            ValueParser::default().parse(&tokens, 0),
            Err(ParseError::UnclosedDict {
                token: tokens[0].clone()
            })
        );
        assert!(matches!(value("{.a"), Err(ParseError::UnclosedDict { .. })));
        assert!(matches!(value("{.a:"), Err(ParseError::UnclosedDict { .. })));
    }

    #[test]
    fn test_lenient_dict_drops_missing_values() {
        assert_eq!(
            value("{.a: .b: 2 .c: nope}").map(|(_, n)| n),
            Ok(dict(vec![("b", 2i64.into())]))
        );
        assert!(matches!(
            strict_value("{.a: }"),
            Err(ParseError::MissingValue { ref token }) if token.text == "a"
        ));
    }

    #[test]
    fn test_lenient_dict_drops_invalid_floats() {
        // 小数部なし
        assert_eq!(
            value("{.a: 1. .b: 2}").map(|(_, n)| n),
            Ok(dict(vec![("b", 2i64.into())]))
        );
        // 小数部が不正
        assert_eq!(
            value("{.a: 1.5x .b: 2}").map(|(_, n)| n),
            Ok(dict(vec![("b", 2i64.into())]))
        );
        // 整数でない記号の後のドットは次のキー
        assert_eq!(
            value("{.a: 12abc.b: 2}").map(|(_, n)| n),
            Ok(dict(vec![("b", 2i64.into())]))
        );
        assert!(matches!(
            strict_value("{.a: 1. .b: 2}"),
            Err(ParseError::MissingDecimal { .. })
        ));
    }

    #[test]
    fn test_literal_end() {
        let tokens = lex("1. 1.5x oops 1.b");
        assert_eq!(literal_end(&tokens, 0), 2);
        assert_eq!(literal_end(&tokens, 2), 5);
        assert_eq!(literal_end(&tokens, 5), 6);
        assert_eq!(literal_end(&tokens, 6), 7);
    }

    #[test]
    fn test_non_value_token() {
        let tokens = lex("=");
        assert_eq!(
            ValueParser::default().parse(&tokens, 0),
            Err(ParseError::unexpected(&tokens[0], "a value"))
        );
        assert!(matches!(
            ValueParser::default().parse(&tokens, 1),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }
}
