//! Parse failures that remember how far parsing got.

use std::fmt;

use thiserror::Error;

use super::lexer::{Token, TokenKind};
use crate::base::{LineCol, LineIndex, TextSize};

/// The grammar position a parse failed at.
///
/// This is the failure signature recovery strategies match on. It is chosen
/// from the production being parsed and what it expected, never from the
/// text that happened to be there, so two different malformed inputs that
/// stop in the same place share a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureShape {
    /// A module name is required: start of input, after `|`, a label or `>`.
    ExpectingModuleName,
    /// A module is complete and only `|`, `--`, `>` or the end may follow.
    ExpectingPipeOrEnd,
    /// `--` was read and a property name must follow immediately.
    ExpectingParamAfterDashDash,
    /// A property name was read and `=` must follow immediately.
    ExpectingEquals,
    /// `=` was read and a value must follow immediately.
    ExpectingValue,
    /// `>` was read after the last module and a `:destination` must follow.
    ExpectingDestination,
    /// A leading `:destination` must be followed by `>`.
    ExpectingGt,
    /// The sink destination was read; nothing may follow it.
    ExpectingEnd,
}

impl fmt::Display for FailureShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureShape::ExpectingModuleName => "expecting module name",
            FailureShape::ExpectingPipeOrEnd => "expecting '|' or end of input",
            FailureShape::ExpectingParamAfterDashDash => "expecting property name after '--'",
            FailureShape::ExpectingEquals => "expecting '=' after property name",
            FailureShape::ExpectingValue => "expecting property value after '='",
            FailureShape::ExpectingDestination => "expecting destination after '>'",
            FailureShape::ExpectingGt => "expecting '>' after destination",
            FailureShape::ExpectingEnd => "expecting end of input",
        };
        f.write_str(s)
    }
}

/// A parse failure carrying the longest prefix of the input that is itself
/// a valid stream definition.
///
/// `partial_dsl` is `input[..checkpoint]`. When the checkpoint is non-zero
/// the prefix parses on its own; a checkpoint of zero means no module was
/// completed and the prefix is empty.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct CheckpointedParseError {
    checkpoint: TextSize,
    partial_dsl: String,
    message: String,
    position: LineCol,
    shape: FailureShape,
    expected: Vec<TokenKind>,
    offending: Token,
    pending: Vec<Token>,
}

impl CheckpointedParseError {
    pub(crate) fn new(
        input: &str,
        checkpoint: TextSize,
        shape: FailureShape,
        expected: &[TokenKind],
        offending: Token,
        pending: Vec<Token>,
    ) -> Self {
        let message = describe(shape, expected, &offending, pending.last());
        let position = LineIndex::new(input).line_col(offending.start());
        Self {
            checkpoint,
            partial_dsl: input[..usize::from(checkpoint)].to_owned(),
            message,
            position,
            shape,
            expected: expected.to_vec(),
            offending,
            pending,
        }
    }

    /// Byte offset up to which the input is a valid stream definition.
    pub fn offset_of_checkpoint(&self) -> usize {
        self.checkpoint.into()
    }

    /// The input up to the checkpoint.
    pub fn partial_dsl(&self) -> &str {
        &self.partial_dsl
    }

    /// The message without the position suffix.
    pub fn raw_message(&self) -> &str {
        &self.message
    }

    /// Line and column of the offending token.
    pub fn position(&self) -> LineCol {
        self.position
    }

    pub fn shape(&self) -> FailureShape {
        self.shape
    }

    pub fn expected(&self) -> &[TokenKind] {
        &self.expected
    }

    /// The token the failing production could not accept.
    pub fn offending(&self) -> &Token {
        &self.offending
    }

    /// Tokens consumed after the checkpoint by the incomplete construct,
    /// for instance `--` and `mode` in `file --mode`.
    pub fn pending(&self) -> &[Token] {
        &self.pending
    }

    /// True when the input simply ran out, as opposed to containing
    /// something the grammar cannot accept.
    pub fn at_end_of_input(&self) -> bool {
        self.offending.is(TokenKind::Eof)
    }
}

fn describe(
    shape: FailureShape,
    expected: &[TokenKind],
    offending: &Token,
    previous: Option<&Token>,
) -> String {
    let found = match offending.kind {
        TokenKind::Eof => "end of input".to_owned(),
        TokenKind::Error(_) => format!("{} '{}'", offending.kind, offending.text),
        _ => format!("'{}'", offending.text),
    };
    let adjacent_required = matches!(
        shape,
        FailureShape::ExpectingParamAfterDashDash
            | FailureShape::ExpectingEquals
            | FailureShape::ExpectingValue
    );
    if adjacent_required
        && expected.contains(&offending.kind)
        && previous.is_some_and(|p| p.end() != offending.start())
    {
        return format!("{shape}: whitespace is not allowed before {found}");
    }
    let expected = expected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    format!("{shape}: expected {expected}, found {found}")
}
