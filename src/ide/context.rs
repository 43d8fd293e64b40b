//! Per-request view of the collaborators used by completion strategies.

use crate::registry::{
    ConfigurationProperty, ModuleConfigurationMetadataResolver, ModuleRegistration,
    ModuleRegistry, ModuleResolver, ModuleType,
};
use crate::syntax::{ModuleDefinition, StreamDefinition};

/// The three collaborators completion depends on, passed explicitly on every call.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub registry: &'a dyn ModuleRegistry,
    pub resolver: &'a dyn ModuleResolver,
    pub metadata: &'a dyn ModuleConfigurationMetadataResolver,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        registry: &'a dyn ModuleRegistry,
        resolver: &'a dyn ModuleResolver,
        metadata: &'a dyn ModuleConfigurationMetadataResolver,
    ) -> Self {
        Self {
            registry,
            resolver,
            metadata,
        }
    }
}

/// Where a module sits in a stream, which bounds the types it can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModulePosition {
    /// First module with no source destination feeding it.
    First,
    /// Anything fed by another module or a destination.
    Downstream,
}

impl ModulePosition {
    pub fn of(stream: &StreamDefinition, index: usize) -> Self {
        if index == 0 && stream.source_destination.is_none() {
            ModulePosition::First
        } else {
            ModulePosition::Downstream
        }
    }

    pub fn plausible_types(self) -> &'static [ModuleType] {
        match self {
            ModulePosition::First => &[ModuleType::Source, ModuleType::Task],
            ModulePosition::Downstream => &[ModuleType::Processor, ModuleType::Sink],
        }
    }
}

pub struct CompletionContext<'a> {
    collaborators: Collaborators<'a>,
    type_precedence: &'a [ModuleType],
}

impl<'a> CompletionContext<'a> {
    pub fn new(collaborators: Collaborators<'a>, type_precedence: &'a [ModuleType]) -> Self {
        Self {
            collaborators,
            type_precedence,
        }
    }

    /// Module types to try at `position`, in configured precedence order.
    pub fn candidate_types(&self, position: ModulePosition) -> impl Iterator<Item = ModuleType> + '_ {
        let plausible = position.plausible_types();
        self.type_precedence
            .iter()
            .copied()
            .filter(move |t| plausible.contains(t))
    }

    /// Infer the type of `name` by trying each candidate type in turn.
    ///
    /// An unregistered name is not an error; there is just nothing to offer.
    pub fn find_module(&self, name: &str, position: ModulePosition) -> Option<ModuleRegistration> {
        let found = self
            .candidate_types(position)
            .find_map(|module_type| self.collaborators.registry.find(name, module_type));
        if found.is_none() {
            tracing::debug!(module = name, ?position, "module not registered for any plausible type");
        }
        found
    }

    /// Registrations usable at `position`, grouped by type precedence and in
    /// registration order within a type.
    pub fn registrations_at(&self, position: ModulePosition) -> Vec<ModuleRegistration> {
        let all = self.collaborators.registry.find_all();
        self.candidate_types(position)
            .flat_map(|module_type| {
                all.iter()
                    .filter(move |r| r.module_type == module_type)
                    .cloned()
            })
            .collect()
    }

    /// Declared properties of a registered module.
    ///
    /// Resolution and metadata failures are logged and yield `None`.
    pub fn properties_of(&self, registration: &ModuleRegistration) -> Option<Vec<ConfigurationProperty>> {
        let artifact = match self.collaborators.resolver.resolve(&registration.coordinates) {
            Ok(artifact) => artifact,
            Err(error) => {
                tracing::warn!(
                    module = %registration.name,
                    %error,
                    "failed to resolve module artifact, no proposals"
                );
                return None;
            }
        };
        match self.collaborators.metadata.list_properties(&artifact) {
            Ok(properties) => Some(properties),
            Err(error) => {
                tracing::warn!(
                    module = %registration.name,
                    %error,
                    "failed to list module properties, no proposals"
                );
                None
            }
        }
    }

    /// The last module of `stream`, its registration and its declared properties.
    pub fn last_module<'s>(
        &self,
        stream: &'s StreamDefinition,
    ) -> Option<(&'s ModuleDefinition, ModuleRegistration, Vec<ConfigurationProperty>)> {
        let index = stream.modules.len().checked_sub(1)?;
        let module = &stream.modules[index];
        let registration = self.find_module(&module.name, ModulePosition::of(stream, index))?;
        let properties = self.properties_of(&registration)?;
        Some((module, registration, properties))
    }
}

/// Explanation for a property proposal; verbosity grows with `detail_level`.
pub(crate) fn property_explanation(property: &ConfigurationProperty, detail_level: u32) -> String {
    if detail_level <= 1 || (property.description.is_empty() && property.default_value.is_none()) {
        return property.short_description.clone();
    }
    let mut explanation = if property.description.is_empty() {
        property.short_description.clone()
    } else {
        property.description.clone()
    };
    if let Some(default_value) = &property.default_value {
        explanation.push_str(&format!(" (default: {default_value})"));
    }
    explanation
}

/// Explanation for a module name proposal.
pub(crate) fn module_explanation(registration: &ModuleRegistration, detail_level: u32) -> String {
    if detail_level <= 1 {
        format!("{} module", registration.module_type)
    } else {
        format!("{} module {}", registration.module_type, registration.coordinates)
    }
}
