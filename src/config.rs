//! Settings for the registry and the completion engine.
//!
//! ```yaml
//! registry:
//!   contents:
//!     "source:time": org.example.module:time-source:1.0.0
//!     "sink:log":    org.example.module:log-sink:1.0.0
//! completion:
//!   type-precedence: [source, processor, sink, task]
//! ```
//!
//! Every section is optional.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::registry::{CoordinatesError, ModuleType};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid registry key '{0}': expected 'type:name'")]
    InvalidRegistryKey(String),
    #[error("invalid coordinates for registry key '{key}'")]
    Coordinates {
        key: String,
        #[source]
        source: CoordinatesError,
    },
    #[error("type precedence must list each module type at most once and not be empty")]
    InvalidTypePrecedence,
}

/// Top-level settings document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub registry: RegistrySettings,
    pub completion: CompletionSettings,
}

/// Static registry contents, keyed `"type:name"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub contents: IndexMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompletionSettings {
    /// Order in which module types are tried when a module name is
    /// ambiguous. Types not plausible at a module's position are skipped.
    pub type_precedence: Vec<ModuleType>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            type_precedence: ModuleType::ALL.to_vec(),
        }
    }
}

impl CompletionSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::with_capacity(self.type_precedence.len());
        for module_type in &self.type_precedence {
            if seen.contains(module_type) {
                return Err(ConfigError::InvalidTypePrecedence);
            }
            seen.push(*module_type);
        }
        if seen.is_empty() {
            return Err(ConfigError::InvalidTypePrecedence);
        }
        Ok(())
    }
}

impl Settings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.completion.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading settings");
        Self::from_yaml_str(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_yaml_str("{}").unwrap();
        assert!(settings.registry.contents.is_empty());
        assert_eq!(settings.completion.type_precedence, ModuleType::ALL.to_vec());
    }

    #[test]
    fn test_full_document() {
        let settings = Settings::from_yaml_str(
            r#"
registry:
  contents:
    "source:time": org.example:time-source:1.0
    "sink:log": org.example:log-sink:1.0
completion:
  type-precedence: [task, source, sink, processor]
"#,
        )
        .unwrap();
        let keys: Vec<_> = settings.registry.contents.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["source:time", "sink:log"]);
        assert_eq!(
            settings.completion.type_precedence,
            vec![ModuleType::Task, ModuleType::Source, ModuleType::Sink, ModuleType::Processor]
        );
    }

    #[test]
    fn test_rejects_repeated_type() {
        let result = Settings::from_yaml_str("completion:\n  type-precedence: [sink, sink]\n");
        assert!(matches!(result, Err(ConfigError::InvalidTypePrecedence)));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let result = Settings::from_yaml_str("completion:\n  type-precedence: [widget]\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.yml");
        std::fs::write(&path, "registry:\n  contents:\n    \"source:time\": g:time-source:1.0\n")
            .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.registry.contents.len(), 1);

        let missing = Settings::load(dir.path().join("missing.yml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
