//! Recursive-descent parser for stream definitions.
//!
//! ```text
//! stream    := (DESTINATION '>')? module ('|' module)* ('>' DESTINATION)?
//! module    := LABEL? IDENTIFIER ('--' param)*
//! param     := IDENTIFIER '=' value        -- no whitespace inside `--k=v`
//! value     := IDENTIFIER | LITERAL
//! ```
//!
//! Parsing is a single left-to-right pass. A checkpoint is taken whenever
//! the text read so far forms a complete stream (after a module name and
//! after each parameter), which is what makes the prefix carried by
//! [`CheckpointedParseError`] reparseable.

use smol_str::SmolStr;

use super::ast::{ModuleDefinition, StreamDefinition};
use super::error::{CheckpointedParseError, FailureShape};
use super::lexer::{Token, TokenKind, tokenize};
use crate::base::TextSize;

/// Parse an anonymous stream definition.
pub fn parse(dsl: &str) -> Result<StreamDefinition, CheckpointedParseError> {
    parse_named("", dsl)
}

/// Parse a stream definition registered under `name`.
pub fn parse_named(
    name: impl Into<SmolStr>,
    dsl: &str,
) -> Result<StreamDefinition, CheckpointedParseError> {
    let mut parser = Parser::new(dsl);
    let (source_destination, modules, sink_destination) = parser.stream()?;
    Ok(StreamDefinition {
        name: name.into(),
        raw_dsl: dsl.to_owned(),
        modules,
        source_destination,
        sink_destination,
    })
}

type ParseResult<T> = Result<T, CheckpointedParseError>;

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    /// Offset where the input stops being a complete stream.
    checkpoint: TextSize,
    /// Token index matching `checkpoint`.
    checkpoint_pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: tokenize(input),
            pos: 0,
            checkpoint: TextSize::from(0),
            checkpoint_pos: 0,
        }
    }

    fn peek(&self) -> &Token {
        // `tokenize` always ends with Eof and `bump` never moves past it.
        &self.tokens[self.pos]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !token.is(TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Accept the next token if it has one of `kinds` and starts exactly
    /// where `previous` ends.
    fn adjacent(&mut self, previous: &Token, kinds: &[TokenKind]) -> Option<Token> {
        let next = self.peek();
        if kinds.contains(&next.kind) && next.start() == previous.end() {
            Some(self.bump())
        } else {
            None
        }
    }

    fn mark_checkpoint(&mut self) {
        self.checkpoint = self.peek().start();
        self.checkpoint_pos = self.pos;
    }

    fn fail(&self, shape: FailureShape, expected: &[TokenKind]) -> CheckpointedParseError {
        let pending = self.tokens[self.checkpoint_pos..self.pos].to_vec();
        tracing::debug!(%shape, checkpoint = ?self.checkpoint, "stream definition parse failed");
        CheckpointedParseError::new(
            self.input,
            self.checkpoint,
            shape,
            expected,
            self.peek().clone(),
            pending,
        )
    }

    fn stream(
        &mut self,
    ) -> ParseResult<(Option<SmolStr>, Vec<ModuleDefinition>, Option<SmolStr>)> {
        let mut source_destination = None;
        if self.at(TokenKind::Destination) {
            source_destination = Some(self.bump().text);
            if !self.at(TokenKind::Gt) {
                return Err(self.fail(FailureShape::ExpectingGt, &[TokenKind::Gt]));
            }
            self.bump();
        }

        let mut modules = Vec::new();
        loop {
            modules.push(self.module()?);
            match self.peek().kind {
                TokenKind::Pipe => {
                    self.bump();
                }
                TokenKind::Gt => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => return Ok((source_destination, modules, None)),
                _ => {
                    return Err(self.fail(
                        FailureShape::ExpectingPipeOrEnd,
                        &[TokenKind::Pipe, TokenKind::DoubleDash, TokenKind::Gt, TokenKind::Eof],
                    ));
                }
            }
        }

        if !self.at(TokenKind::Destination) {
            return Err(self.fail(FailureShape::ExpectingDestination, &[TokenKind::Destination]));
        }
        let sink_destination = self.bump().text;
        self.mark_checkpoint();
        if !self.at(TokenKind::Eof) {
            return Err(self.fail(FailureShape::ExpectingEnd, &[TokenKind::Eof]));
        }
        Ok((source_destination, modules, Some(sink_destination)))
    }

    fn module(&mut self) -> ParseResult<ModuleDefinition> {
        let label = self.at(TokenKind::Label).then(|| self.bump().text);
        if !self.at(TokenKind::Identifier) {
            let expected: &[TokenKind] = if label.is_some() {
                &[TokenKind::Identifier]
            } else {
                &[TokenKind::Label, TokenKind::Identifier]
            };
            return Err(self.fail(FailureShape::ExpectingModuleName, expected));
        }

        let mut module = ModuleDefinition::new(self.bump().text);
        module.label = label;
        self.mark_checkpoint();

        while self.at(TokenKind::DoubleDash) {
            let dashes = self.bump();
            let Some(key) = self.adjacent(&dashes, &[TokenKind::Identifier]) else {
                return Err(self.fail(
                    FailureShape::ExpectingParamAfterDashDash,
                    &[TokenKind::Identifier],
                ));
            };
            let Some(equals) = self.adjacent(&key, &[TokenKind::Equals]) else {
                return Err(self.fail(FailureShape::ExpectingEquals, &[TokenKind::Equals]));
            };
            let Some(value) = self.adjacent(&equals, &[TokenKind::Identifier, TokenKind::Literal])
            else {
                return Err(self.fail(
                    FailureShape::ExpectingValue,
                    &[TokenKind::Identifier, TokenKind::Literal],
                ));
            };
            module.parameters.insert(key.text, value.text.to_string());
            self.mark_checkpoint();
        }

        Ok(module)
    }
}
