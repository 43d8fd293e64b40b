//! Completion proposals for partially written stream definitions.
//!
//! The engine parses the text first. When it parses, expansion strategies
//! suggest how to extend it; when it does not, the failure is handed to the
//! first matching recovery strategy. Either way the result is deduplicated
//! by proposal text and returned in a deterministic order. Completion never
//! fails: the worst case is an empty list.

use rustc_hash::FxHashSet;

use super::context::{Collaborators, CompletionContext};
use super::expansion::ExpansionStrategies;
use super::recovery::RecoveryStrategies;
use crate::config::{CompletionSettings, ConfigError};
use crate::registry::ModuleType;
use crate::syntax::parse;

/// Whether a proposal extends the token being typed or starts a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProposalKind {
    /// Completes the current token, e.g. `file --` → `file --mode=`.
    Expanding,
    /// Adds a new token, e.g. `file` → `file | log`.
    Addition,
}

/// One completion candidate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompletionProposal {
    /// The full DSL text that would replace what was typed.
    pub text: String,
    pub explanation: String,
    pub kind: ProposalKind,
}

impl CompletionProposal {
    pub fn expanding(text: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            explanation: explanation.into(),
            kind: ProposalKind::Expanding,
        }
    }

    pub fn addition(text: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            explanation: explanation.into(),
            kind: ProposalKind::Addition,
        }
    }
}

/// Stateless completion engine; one instance can serve concurrent requests.
pub struct CompletionEngine {
    expansions: ExpansionStrategies,
    recoveries: RecoveryStrategies,
    type_precedence: Vec<ModuleType>,
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionEngine {
    /// Engine with the built-in strategies and the default type precedence.
    pub fn new() -> Self {
        Self {
            expansions: ExpansionStrategies::standard(),
            recoveries: RecoveryStrategies::standard(),
            type_precedence: CompletionSettings::default().type_precedence,
        }
    }

    pub fn from_settings(settings: &CompletionSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::new().with_type_precedence(settings.type_precedence.clone()))
    }

    /// Order in which module types are tried when inferring a module's type.
    pub fn with_type_precedence(mut self, type_precedence: Vec<ModuleType>) -> Self {
        self.type_precedence = type_precedence;
        self
    }

    pub fn with_recoveries(mut self, recoveries: RecoveryStrategies) -> Self {
        self.recoveries = recoveries;
        self
    }

    pub fn with_expansions(mut self, expansions: ExpansionStrategies) -> Self {
        self.expansions = expansions;
        self
    }

    pub fn type_precedence(&self) -> &[ModuleType] {
        &self.type_precedence
    }

    /// Proposals for `dsl`. `detail_level` only changes explanations.
    pub fn complete(
        &self,
        collaborators: Collaborators<'_>,
        dsl: &str,
        detail_level: u32,
    ) -> Vec<CompletionProposal> {
        let ctx = CompletionContext::new(collaborators, &self.type_precedence);
        let mut proposals = Vec::new();

        match parse(dsl) {
            Ok(stream) => {
                for strategy in self.expansions.iter() {
                    strategy.add_proposals(&ctx, dsl, &stream, detail_level, &mut proposals);
                }
            }
            Err(error) => match self.recoveries.select(&error) {
                Some(strategy) => {
                    tracing::debug!(strategy = strategy.name(), shape = %error.shape(), "recovering");
                    strategy.add_proposals(&ctx, dsl, &error, detail_level, &mut proposals);
                }
                None => {
                    tracing::debug!(shape = %error.shape(), "no recovery strategy matches");
                }
            },
        }

        dedup_by_text(proposals)
    }
}

/// Keep the first proposal for each distinct text, preserving order.
fn dedup_by_text(mut proposals: Vec<CompletionProposal>) -> Vec<CompletionProposal> {
    let mut seen = FxHashSet::default();
    proposals.retain(|proposal| seen.insert(proposal.text.clone()));
    proposals
}
