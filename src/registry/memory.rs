//! In-process registry and metadata resolver.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{
    Artifact, ArtifactCoordinates, ConfigurationProperty, MetadataError,
    ModuleConfigurationMetadataResolver, ModuleRegistration, ModuleRegistry, ModuleType,
};
use crate::config::{ConfigError, RegistrySettings};

/// A module registry held in memory.
///
/// Registration usually happens once at startup (see
/// [`InMemoryModuleRegistry::from_settings`]) while lookups come from any
/// number of concurrent completion requests, so the map sits behind a
/// read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryModuleRegistry {
    mappings: RwLock<IndexMap<(ModuleType, SmolStr), ArtifactCoordinates>>,
}

impl InMemoryModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `"type:name" -> coordinates` settings entries.
    ///
    /// Spaces in keys are ignored. A key registered twice keeps the later
    /// coordinates and logs a warning.
    pub fn from_settings(settings: &RegistrySettings) -> Result<Self, ConfigError> {
        let registry = Self::new();
        for (key, value) in &settings.contents {
            let compact: String = key.chars().filter(|c| *c != ' ').collect();
            let Some((type_part, name)) = compact.split_once(':') else {
                return Err(ConfigError::InvalidRegistryKey(key.clone()));
            };
            let module_type = type_part
                .parse::<ModuleType>()
                .map_err(|_| ConfigError::InvalidRegistryKey(key.clone()))?;
            if name.is_empty() {
                return Err(ConfigError::InvalidRegistryKey(key.clone()));
            }
            let coordinates =
                ArtifactCoordinates::parse(value).map_err(|source| ConfigError::Coordinates {
                    key: key.clone(),
                    source,
                })?;
            registry.register(module_type, name, coordinates);
        }
        Ok(registry)
    }

    /// Register a module, returning the coordinates it replaced, if any.
    pub fn register(
        &self,
        module_type: ModuleType,
        name: impl Into<SmolStr>,
        coordinates: ArtifactCoordinates,
    ) -> Option<ArtifactCoordinates> {
        let name = name.into();
        let before = self
            .mappings
            .write()
            .insert((module_type, name.clone()), coordinates.clone());
        if let Some(before) = &before {
            tracing::warn!(
                "duplicate mapping for module '{}:{}': both {} and {} registered",
                module_type,
                name,
                before,
                coordinates
            );
        }
        before
    }

    pub fn len(&self) -> usize {
        self.mappings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn find(&self, name: &str, module_type: ModuleType) -> Option<ModuleRegistration> {
        self.mappings
            .read()
            .get(&(module_type, SmolStr::new(name)))
            .map(|coordinates| ModuleRegistration {
                name: SmolStr::new(name),
                module_type,
                coordinates: coordinates.clone(),
            })
    }

    fn find_all(&self) -> Vec<ModuleRegistration> {
        self.mappings
            .read()
            .iter()
            .map(|((module_type, name), coordinates)| ModuleRegistration {
                name: name.clone(),
                module_type: *module_type,
                coordinates: coordinates.clone(),
            })
            .collect()
    }
}

/// Configuration metadata held in memory, keyed by artifact coordinates.
///
/// Artifacts without an entry declare no properties.
#[derive(Debug, Default)]
pub struct InMemoryMetadataResolver {
    properties: FxHashMap<ArtifactCoordinates, Vec<ConfigurationProperty>>,
}

impl InMemoryMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(
        mut self,
        coordinates: ArtifactCoordinates,
        properties: Vec<ConfigurationProperty>,
    ) -> Self {
        self.insert(coordinates, properties);
        self
    }

    pub fn insert(&mut self, coordinates: ArtifactCoordinates, properties: Vec<ConfigurationProperty>) {
        self.properties.insert(coordinates, properties);
    }
}

impl ModuleConfigurationMetadataResolver for InMemoryMetadataResolver {
    fn list_properties(
        &self,
        artifact: &Artifact,
    ) -> Result<Vec<ConfigurationProperty>, MetadataError> {
        match self.properties.get(&artifact.coordinates) {
            Some(properties) => Ok(properties.clone()),
            None => {
                tracing::debug!(coordinates = %artifact.coordinates, "no configuration metadata");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates(artifact: &str) -> ArtifactCoordinates {
        ArtifactCoordinates::new("org.example", artifact, "1.0")
    }

    #[test]
    fn test_find_by_name_and_type() {
        let registry = InMemoryModuleRegistry::new();
        registry.register(ModuleType::Source, "file", coordinates("file-source"));
        registry.register(ModuleType::Sink, "file", coordinates("file-sink"));

        let source = registry.find("file", ModuleType::Source).unwrap();
        assert_eq!(source.coordinates.artifact_id(), "file-source");
        let sink = registry.find("file", ModuleType::Sink).unwrap();
        assert_eq!(sink.coordinates.artifact_id(), "file-sink");
        assert!(registry.find("file", ModuleType::Processor).is_none());
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let registry = InMemoryModuleRegistry::new();
        assert!(registry.register(ModuleType::Sink, "log", coordinates("a")).is_none());
        let before = registry.register(ModuleType::Sink, "log", coordinates("b"));

        assert_eq!(before, Some(coordinates("a")));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.find("log", ModuleType::Sink).unwrap().coordinates,
            coordinates("b")
        );
    }

    #[test]
    fn test_find_all_keeps_registration_order() {
        let registry = InMemoryModuleRegistry::new();
        registry.register(ModuleType::Sink, "log", coordinates("log-sink"));
        registry.register(ModuleType::Source, "time", coordinates("time-source"));
        registry.register(ModuleType::Processor, "filter", coordinates("filter-processor"));

        let names: Vec<_> = registry.find_all().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["log", "time", "filter"]);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = RegistrySettings::default();
        settings
            .contents
            .insert("source : time".to_owned(), "org.example:time-source:1.0".to_owned());
        settings
            .contents
            .insert("sink:log".to_owned(), "org.example:log-sink:jar:exec:1.0".to_owned());

        let registry = InMemoryModuleRegistry::from_settings(&settings).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.find("time", ModuleType::Source).is_some());
        assert_eq!(
            registry.find("log", ModuleType::Sink).unwrap().coordinates.classifier(),
            "exec"
        );
    }

    #[test]
    fn test_from_settings_rejects_bad_key() {
        let mut settings = RegistrySettings::default();
        settings
            .contents
            .insert("widget:time".to_owned(), "org.example:time-source:1.0".to_owned());
        assert!(matches!(
            InMemoryModuleRegistry::from_settings(&settings),
            Err(ConfigError::InvalidRegistryKey(_))
        ));
    }

    #[test]
    fn test_metadata_for_unknown_artifact_is_empty() {
        let resolver = InMemoryMetadataResolver::new().with_properties(
            coordinates("file-source"),
            vec![ConfigurationProperty::new("mode", "how to read the file")],
        );

        let known = Artifact::new(coordinates("file-source"), "/tmp/file-source.jar");
        assert_eq!(resolver.list_properties(&known).unwrap().len(), 1);

        let unknown = Artifact::new(coordinates("log-sink"), "/tmp/log-sink.jar");
        assert!(resolver.list_properties(&unknown).unwrap().is_empty());
    }
}
