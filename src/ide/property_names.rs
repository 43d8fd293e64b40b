//! Proposals for module configuration property names.

use super::completion::CompletionProposal;
use super::context::{CompletionContext, property_explanation};
use super::expansion::ExpansionStrategy;
use super::recovery::{RecoveryStrategy, reparse_prefix};
use crate::syntax::{CheckpointedParseError, FailureShape, StreamDefinition, TokenKind};

/// `file --` → `file --mode=`, `file --pattern=`, ...
///
/// Offers every property the last module declares and has not set yet,
/// in the order the metadata resolver lists them.
pub struct PropertyNameAfterDashDash;

impl RecoveryStrategy for PropertyNameAfterDashDash {
    fn name(&self) -> &'static str {
        "property-name-after-dash-dash"
    }

    fn matches(&self, shape: FailureShape) -> bool {
        matches!(shape, FailureShape::ExpectingParamAfterDashDash)
    }

    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        error: &CheckpointedParseError,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    ) {
        // Something other than a name follows the dashes.
        if !error.at_end_of_input() {
            return;
        }
        let Some(stream) = reparse_prefix(error) else {
            return;
        };
        let Some((module, _, properties)) = ctx.last_module(&stream) else {
            return;
        };

        let base = dsl.trim_end();
        collector.extend(
            properties
                .iter()
                .filter(|property| !module.has_parameter(&property.id))
                .map(|property| {
                    CompletionProposal::expanding(
                        format!("{base}{}=", property.id),
                        property_explanation(property, detail_level),
                    )
                }),
        );
    }
}

/// `file --pa` → `file --pattern=`.
pub struct UnfinishedPropertyName;

impl RecoveryStrategy for UnfinishedPropertyName {
    fn name(&self) -> &'static str {
        "unfinished-property-name"
    }

    fn matches(&self, shape: FailureShape) -> bool {
        matches!(shape, FailureShape::ExpectingEquals)
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
        let Some(typed) = error.pending().iter().rfind(|t| t.is(TokenKind::Identifier)) else {
            return;
        };
        let Some(stream) = reparse_prefix(error) else {
            return;
        };
        let Some((module, _, properties)) = ctx.last_module(&stream) else {
            return;
        };

        let base = &dsl[..usize::from(typed.start())];
        collector.extend(
            properties
                .iter()
                .filter(|property| {
                    property.id.starts_with(typed.text.as_str()) && !module.has_parameter(&property.id)
                })
                .map(|property| {
                    CompletionProposal::expanding(
                        format!("{base}{}=", property.id),
                        property_explanation(property, detail_level),
                    )
                }),
        );
    }
}

/// `file` → `file --mode=`, `file --pattern=`, ...
pub struct ModuleOptions;

impl ExpansionStrategy for ModuleOptions {
    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        stream: &StreamDefinition,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    ) {
        // Nothing may follow a sink destination.
        if stream.sink_destination.is_some() {
            return;
        }
        let Some((module, _, properties)) = ctx.last_module(stream) else {
            return;
        };

        let base = dsl.trim_end();
        collector.extend(
            properties
                .iter()
                .filter(|property| !module.has_parameter(&property.id))
                .map(|property| {
                    CompletionProposal::addition(
                        format!("{base} --{}=", property.id),
                        property_explanation(property, detail_level),
                    )
                }),
        );
    }
}
