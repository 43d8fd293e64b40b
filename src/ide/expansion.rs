//! Expansion strategies: proposals for text that already parses.

use std::slice;

use super::completion::CompletionProposal;
use super::context::CompletionContext;
use super::module_names::{PipeIntoOtherModules, UnfinishedModuleName};
use super::property_names::ModuleOptions;
use crate::syntax::StreamDefinition;

/// Proposes ways to continue a valid stream definition.
pub trait ExpansionStrategy: Send + Sync {
    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        stream: &StreamDefinition,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    );
}

/// Expansion strategies, all of which run, in order.
#[derive(Default)]
pub struct ExpansionStrategies {
    strategies: Vec<Box<dyn ExpansionStrategy>>,
}

impl ExpansionStrategies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the module name, then add options, then pipe onwards.
    pub fn standard() -> Self {
        let mut strategies = Self::new();
        strategies.register(UnfinishedModuleName);
        strategies.register(ModuleOptions);
        strategies.register(PipeIntoOtherModules);
        strategies
    }

    pub fn register(&mut self, strategy: impl ExpansionStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    pub fn iter(&self) -> slice::Iter<'_, Box<dyn ExpansionStrategy>> {
        self.strategies.iter()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
