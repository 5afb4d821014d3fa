use super::core::{ParseError, ParseResult, Parser};
use crate::tokenizer::token::{Token, TokenKind};
use std::marker::PhantomData;

// Expect: 指定した種類のトークンを一つ消費して返す
#[derive(Clone, Copy)]
pub struct Expect {
    kind: TokenKind,
}

impl Expect {
    pub fn new(kind: TokenKind) -> Self {
        Self { kind }
    }
}

impl Parser<Token, Token> for Expect {
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Token> {
        match input.get(pos) {
            Some(token) if token.kind == self.kind => Ok((pos + 1, token.clone())),
            Some(token) => Err(ParseError::unexpected(token, self.kind.to_string())),
            None => Err(ParseError::eof(input)),
        }
    }
}

#[derive(Clone)]
pub struct Map<P, F, A, B> {
    parser: P,
    f: F,
    _phantom: PhantomData<(A, B)>,
}

impl<P, F, A, B> Map<P, F, A, B> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for Map<P, F, A, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<B> {
        self.parser
            .parse(input, pos)
            .map(|(pos, value)| (pos, (self.f)(value)))
    }
}

// Preceded: 一つ目の結果を捨てて二つ目の結果を返す
#[derive(Clone)]
pub struct Preceded<P1, P2, O1> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<O1>,
}

impl<P1, P2, O1> Preceded<P1, P2, O1> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, O2> for Preceded<P1, P2, O1>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O2> {
        let (pos, _) = self.parser1.parse(input, pos)?;
        self.parser2.parse(input, pos)
    }
}

#[derive(Clone)]
pub struct Tuple2<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Tuple2<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self { parser1, parser2 }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, (O1, O2)> for Tuple2<P1, P2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<(O1, O2)> {
        let (pos, result1) = self.parser1.parse(input, pos)?;
        let (pos, result2) = self.parser2.parse(input, pos)?;
        Ok((pos, (result1, result2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::token::tokenize;

    #[test]
    fn test_expect() {
        let input = tokenize(b"a:");

        // 成功するケース
        let parser = Expect::new(TokenKind::Symbol);
        let (pos, token) = parser.parse(&input, 0).unwrap();
        assert_eq!(pos, 1);
        assert_eq!(token.text, "a");

        // 失敗するケース (種類が違う)
        let parser = Expect::new(TokenKind::Equals);
        assert!(matches!(
            parser.parse(&input, 1),
            Err(ParseError::UnexpectedToken { ref expected, .. }) if expected == "Equals"
        ));

        // 失敗するケース (入力範囲外)
        assert!(matches!(
            parser.parse(&input, 2),
            Err(ParseError::UnexpectedEof { after: Some(_) })
        ));
    }

    #[test]
    fn test_map() {
        let input = tokenize(b"abc");
        let parser = Map::new(Expect::new(TokenKind::Symbol), |token: Token| token.text);
        assert_eq!(parser.parse(&input, 0), Ok((1, "abc".to_string())));
    }

    #[test]
    fn test_preceded() {
        let input = tokenize(b".key");
        let parser = Preceded::new(Expect::new(TokenKind::Dot), Expect::new(TokenKind::Symbol));
        let (pos, token) = parser.parse(&input, 0).unwrap();
        assert_eq!(pos, 2);
        assert_eq!(token.text, "key");

        // 失敗するケース (一つ目が失敗)
        assert!(parser.parse(&input, 1).is_err());
    }

    #[test]
    fn test_tuple2() {
        let input = tokenize(b"::");
        let parser = Tuple2::new(Expect::new(TokenKind::Colon), Expect::new(TokenKind::Colon));
        let (pos, (first, second)) = parser.parse(&input, 0).unwrap();
        assert_eq!(pos, 2);
        assert_eq!(first.position.column, 0);
        assert_eq!(second.position.column, 1);

        // 失敗するケース (二つ目が範囲外)
        assert!(parser.parse(&input, 1).is_err());
    }
}
