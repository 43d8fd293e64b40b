//! # streamdsl
//!
//! Parser and completion engine for pipe-delimited stream definitions such
//! as `:orders > filter --expression=payload.total>100 | log`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Completion engine, recovery and expansion strategies
//!   ↓
//! registry  → Module registry, artifact resolver, configuration metadata
//!   ↓
//! syntax    → Lexer + checkpointing parser, parsed definitions
//!   ↓
//! base      → Primitives (TextRange, LineCol)
//! ```
//!
//! `config` loads YAML settings for `registry` and `ide`.

// ============================================================================
// FOUNDATION
// ============================================================================

/// Foundation types: TextRange, LineCol, LineIndex
pub mod base;

/// Stream definition syntax: lexer, parser, definitions
pub mod syntax;

// ============================================================================
// COMPLETION
// ============================================================================

/// Module registry and artifact collaborators
pub mod registry;

/// Completion proposals for partially typed definitions
pub mod ide;

/// YAML settings
pub mod config;

// Re-export commonly needed items
pub use base::{LineCol, LineIndex, TextRange, TextSize};
pub use config::{ConfigError, Settings};
pub use ide::{Collaborators, CompletionEngine, CompletionProposal, ProposalKind};
pub use syntax::{
    CheckpointedParseError, FailureShape, ModuleDefinition, StreamDefinition, parse, parse_named,
    tokenize,
};
