//! Completion for stream definitions being typed.
//!
//! This module sits between the parser and whatever editor or shell asks for
//! proposals. It knows nothing about any UI protocol.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: text and collaborators in, proposals out
//! 2. **No shared state**: the engine is immutable after construction
//! 3. **Composable**: strategies are small and registered in order
//!
//! ## Usage
//!
//! ```ignore
//! use streamdsl::ide::{Collaborators, CompletionEngine};
//!
//! let engine = CompletionEngine::new();
//! let collaborators = Collaborators::new(&registry, &resolver, &metadata);
//! let proposals = engine.complete(collaborators, "file --", 1);
//! ```

mod completion;
mod context;
mod expansion;
mod module_names;
mod property_names;
mod property_values;
mod recovery;

pub use completion::{CompletionEngine, CompletionProposal, ProposalKind};
pub use context::{Collaborators, CompletionContext, ModulePosition};
pub use expansion::{ExpansionStrategies, ExpansionStrategy};
pub use module_names::{ModuleNameRecovery, PipeIntoOtherModules, UnfinishedModuleName};
pub use property_names::{ModuleOptions, PropertyNameAfterDashDash, UnfinishedPropertyName};
pub use property_values::PropertyValueRecovery;
pub use recovery::{RecoveryStrategies, RecoveryStrategy};
