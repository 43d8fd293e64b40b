//! Proposals for module configuration property values.

use super::completion::CompletionProposal;
use super::context::{CompletionContext, property_explanation};
use super::recovery::{RecoveryStrategy, reparse_prefix};
use crate::syntax::{CheckpointedParseError, DslValue, FailureShape, TokenKind};

/// `file --mode=` → `file --mode=lines`, `file --mode=ref`, ...
///
/// Uses the declared value hints of the property, or its default value when
/// it declares no hints.
pub struct PropertyValueRecovery;

impl RecoveryStrategy for PropertyValueRecovery {
    fn name(&self) -> &'static str {
        "property-value"
    }

    fn matches(&self, shape: FailureShape) -> bool {
        matches!(shape, FailureShape::ExpectingValue)
    }

    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        error: &CheckpointedParseError,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    ) {
        if !error.at_end_of_input() {
            return;
        }
        let Some(key) = error.pending().iter().rfind(|t| t.is(TokenKind::Identifier)) else {
            return;
        };
        let Some(stream) = reparse_prefix(error) else {
            return;
        };
        let Some((_, _, properties)) = ctx.last_module(&stream) else {
            return;
        };
        let Some(property) = properties.iter().find(|p| p.id == key.text) else {
            return;
        };

        let values = if property.value_hints.is_empty() {
            property.default_value.iter().collect::<Vec<_>>()
        } else {
            property.value_hints.iter().collect()
        };
        let base = dsl.trim_end();
        let explanation = property_explanation(property, detail_level);
        collector.extend(values.into_iter().map(|value| {
            CompletionProposal::expanding(format!("{base}{}", DslValue(value)), explanation.clone())
        }));
    }
}
