//! Stream definition syntax: tokens, parser and parsed definitions.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{DslValue, ModuleDefinition, StreamDefinition};
pub use error::{CheckpointedParseError, FailureShape};
pub use lexer::{LexError, Token, TokenKind, tokenize};
pub use parser::{parse, parse_named};
