use tracing::{debug, trace};

use super::super::core::*;
use super::value::ValueParser;
use crate::{
    ast::{Ast, Node},
    config::{ParserConfig, ScopeMode},
    tokenizer::token::{Token, TokenKind},
};

/// Scope segments opened with `name::`.
#[derive(Debug, Clone, Default)]
struct ScopeStack {
    segments: Vec<String>,
    mode: ScopeMode,
}

impl ScopeStack {
    fn new(mode: ScopeMode) -> Self {
        Self {
            segments: Vec::new(),
            mode,
        }
    }

    fn push(&mut self, segment: &str) {
        self.segments.push(segment.to_string());
    }

    /// Stores `node` under `key`, nested below the active scope segments.
    fn bind(&mut self, ast: &mut Ast, key: &str, node: Node) {
        if self.segments.is_empty() {
            ast.insert(key, node);
            return;
        }

        let mut path = self.segments.clone();
        path.push(key.to_string());
        trace!("scoped assignment {}", path.join("."));
        ast.insert_path(&path, node);

        if self.mode == ScopeMode::SingleUse {
            self.segments.clear();
        }
    }
}

/// Top-level loop: assignments `key = value`, scope declarations `name::` and newlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootParser {
    config: ParserConfig,
}

impl RootParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl Parser<Token, Ast> for RootParser {
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = input.len()))]
    fn parse(&self, input: &[Token], pos: usize) -> ParseResult<Ast> {
        let value = ValueParser::new(self.config);
        let mut ast = Ast::new();
        let mut scopes = ScopeStack::new(self.config.scope_mode);
        let mut pos = pos;

        while let Some(token) = input.get(pos) {
            match token.kind {
                TokenKind::NewLine => pos += 1,
                TokenKind::Dot => {
                    return Err(ParseError::MisplacedDot {
                        token: token.clone(),
                    })
                }
                TokenKind::Symbol => match input.get(pos + 1) {
                    None => {
                        return Err(ParseError::MissingDeclaration {
                            token: token.clone(),
                        })
                    }
                    Some(equals) if equals.is(TokenKind::Equals) => {
                        match input.get(pos + 2) {
                            None => {
                                return Err(ParseError::MissingValue {
                                    token: token.clone(),
                                })
                            }
                            Some(next) if next.is(TokenKind::NewLine) => {
                                return Err(ParseError::MissingValue {
                                    token: token.clone(),
                                })
                            }
                            Some(_) => {}
                        }
                        let (next, node) = value.parse(input, pos + 2)?;
                        scopes.bind(&mut ast, &token.text, node);
                        pos = next;
                    }
                    Some(colon) if colon.is(TokenKind::Colon) => match input.get(pos + 2) {
                        None => {
                            return Err(ParseError::MissingColon {
                                token: colon.clone(),
                            })
                        }
                        Some(second) if second.is(TokenKind::Colon) => {
                            scopes.push(&token.text);
                            pos += 3;
                        }
                        Some(other) => return Err(ParseError::unexpected(other, "':'")),
                    },
                    Some(other) => return Err(ParseError::unexpected(other, "'=' or '::'")),
                },
                _ => return Err(ParseError::unexpected(token, "a key")),
            }
        }

        debug!(
            "parsed {} assignments ({} including nested entries)",
            ast.len(),
            ast.assignment_count()
        );
        Ok((pos, ast))
    }
}
