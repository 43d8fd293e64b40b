//! Foundation types shared by the lexer, parser and completion engine.
//!
//! - [`TextRange`], [`TextSize`] - byte positions in DSL text
//! - [`LineCol`], [`LineIndex`] - line/column conversion for messages
//!
//! This module has NO dependencies on other streamdsl modules.

mod span;

pub use span::{LineCol, LineIndex, TextRange, TextSize, range_of};

// Re-export text-size types for convenience
pub use text_size;
