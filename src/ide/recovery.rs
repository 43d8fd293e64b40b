//! Recovery strategies: completion proposals for input that does not parse.
//!
//! Each strategy declares which [`FailureShape`]s it handles. Strategies are
//! kept in an explicit priority list and the first match wins; when nothing
//! matches the request simply has no proposals.

use super::completion::CompletionProposal;
use super::context::CompletionContext;
use super::module_names::ModuleNameRecovery;
use super::property_names::{PropertyNameAfterDashDash, UnfinishedPropertyName};
use super::property_values::PropertyValueRecovery;
use crate::syntax::{CheckpointedParseError, FailureShape, StreamDefinition, parse};

/// Proposes completions for one kind of parse failure.
pub trait RecoveryStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn matches(&self, shape: FailureShape) -> bool;

    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        error: &CheckpointedParseError,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    );
}

/// Ordered set of recovery strategies.
#[derive(Default)]
pub struct RecoveryStrategies {
    strategies: Vec<Box<dyn RecoveryStrategy>>,
}

impl RecoveryStrategies {
    /// An empty set; every failure yields no proposals.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in strategies, in priority order.
    pub fn standard() -> Self {
        let mut strategies = Self::new();
        strategies.register(PropertyNameAfterDashDash);
        strategies.register(UnfinishedPropertyName);
        strategies.register(PropertyValueRecovery);
        strategies.register(ModuleNameRecovery);
        strategies
    }

    /// Append a strategy with lower priority than every registered one.
    pub fn register(&mut self, strategy: impl RecoveryStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// First strategy, in registration order, that handles the failure.
    pub fn select(&self, error: &CheckpointedParseError) -> Option<&dyn RecoveryStrategy> {
        let shape = error.shape();
        self.strategies
            .iter()
            .find(|strategy| strategy.matches(shape))
            .map(|strategy| &**strategy)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Parse the valid prefix carried by `error`.
///
/// `None` when no module was complete before the failure.
pub(crate) fn reparse_prefix(error: &CheckpointedParseError) -> Option<StreamDefinition> {
    if error.offset_of_checkpoint() == 0 {
        return None;
    }
    match parse(error.partial_dsl()) {
        Ok(stream) => Some(stream),
        Err(reparse_error) => {
            tracing::debug!(
                prefix = error.partial_dsl(),
                %reparse_error,
                "checkpoint prefix did not reparse"
            );
            None
        }
    }
}
