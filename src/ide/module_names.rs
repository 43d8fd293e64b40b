//! Proposals for module names.

use super::completion::CompletionProposal;
use super::context::{CompletionContext, ModulePosition, module_explanation};
use super::expansion::ExpansionStrategy;
use super::recovery::{RecoveryStrategy, reparse_prefix};
use crate::syntax::{CheckpointedParseError, FailureShape, StreamDefinition, TokenKind, tokenize};

/// `file |` → `file | filter`, `file | log`, ...
///
/// Also covers empty input and a dangling label, where the first module of
/// the stream is expected.
pub struct ModuleNameRecovery;

impl RecoveryStrategy for ModuleNameRecovery {
    fn name(&self) -> &'static str {
        "module-name"
    }

    fn matches(&self, shape: FailureShape) -> bool {
        matches!(shape, FailureShape::ExpectingModuleName)
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
        // After a complete module or a leading `:destination >`.
        let fed = reparse_prefix(error).is_some()
            || tokenize(dsl).first().is_some_and(|t| t.is(TokenKind::Destination));
        let position = if fed {
            ModulePosition::Downstream
        } else {
            ModulePosition::First
        };

        let separator = if dsl.is_empty() || dsl.ends_with(char::is_whitespace) {
            ""
        } else {
            " "
        };
        collector.extend(ctx.registrations_at(position).iter().map(|registration| {
            CompletionProposal::addition(
                format!("{dsl}{separator}{}", registration.name),
                module_explanation(registration, detail_level),
            )
        }));
    }
}

/// `file | lo` → `file | log`.
pub struct UnfinishedModuleName;

impl ExpansionStrategy for UnfinishedModuleName {
    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        stream: &StreamDefinition,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    ) {
        let Some(module) = stream.last_module() else {
            return;
        };
        if !module.parameters.is_empty()
            || stream.sink_destination.is_some()
            || !dsl.ends_with(module.name.as_str())
        {
            return;
        }

        let position = ModulePosition::of(stream, stream.modules.len() - 1);
        let base = &dsl[..dsl.len() - module.name.len()];
        collector.extend(
            ctx.registrations_at(position)
                .iter()
                .filter(|r| r.name.starts_with(module.name.as_str()) && r.name != module.name)
                .map(|registration| {
                    CompletionProposal::expanding(
                        format!("{base}{}", registration.name),
                        module_explanation(registration, detail_level),
                    )
                }),
        );
    }
}

/// `time` → `time | filter`, `time | log`, ...
///
/// Only offered when the last module is known to produce output.
pub struct PipeIntoOtherModules;

impl ExpansionStrategy for PipeIntoOtherModules {
    fn add_proposals(
        &self,
        ctx: &CompletionContext<'_>,
        dsl: &str,
        stream: &StreamDefinition,
        detail_level: u32,
        collector: &mut Vec<CompletionProposal>,
    ) {
        if stream.sink_destination.is_some() {
            return;
        }
        let Some(module) = stream.last_module() else {
            return;
        };
        let position = ModulePosition::of(stream, stream.modules.len() - 1);
        let Some(registration) = ctx.find_module(&module.name, position) else {
            return;
        };
        if !registration.module_type.has_output() {
            return;
        }

        let base = dsl.trim_end();
        collector.extend(
            ctx.registrations_at(ModulePosition::Downstream)
                .iter()
                .map(|next| {
                    CompletionProposal::addition(
                        format!("{base} | {}", next.name),
                        module_explanation(next, detail_level),
                    )
                }),
        );
    }
}
