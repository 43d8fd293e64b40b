//! Module registry and artifact collaborators.
//!
//! The completion engine never owns these. It is handed a
//! [`ModuleRegistry`], a [`ModuleResolver`] and a
//! [`ModuleConfigurationMetadataResolver`] and only reads from them, possibly
//! from many requests at once, hence the `Send + Sync` bounds.
//!
//! In-process implementations are provided for embedding and tests:
//! [`InMemoryModuleRegistry`], [`InMemoryMetadataResolver`] and
//! [`LocalRepositoryResolver`].

mod coordinates;
mod local;
mod memory;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

pub use coordinates::{ArtifactCoordinates, CoordinatesError};
pub use local::LocalRepositoryResolver;
pub use memory::{InMemoryMetadataResolver, InMemoryModuleRegistry};

// ============================================================================
// MODULE TYPES & REGISTRATIONS
// ============================================================================

/// The role a module plays in a stream or as a standalone task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Source,
    Processor,
    Sink,
    Task,
}

impl ModuleType {
    pub const ALL: [ModuleType; 4] = [
        ModuleType::Source,
        ModuleType::Processor,
        ModuleType::Sink,
        ModuleType::Task,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Source => "source",
            ModuleType::Processor => "processor",
            ModuleType::Sink => "sink",
            ModuleType::Task => "task",
        }
    }

    /// Whether output of a module of this type can be piped onwards.
    pub fn has_output(self) -> bool {
        matches!(self, ModuleType::Source | ModuleType::Processor)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown module type '{0}'")]
pub struct UnknownModuleType(pub String);

impl FromStr for ModuleType {
    type Err = UnknownModuleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownModuleType(s.to_owned()))
    }
}

/// A module known to the registry under a `(name, type)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRegistration {
    pub name: SmolStr,
    pub module_type: ModuleType,
    pub coordinates: ArtifactCoordinates,
}

// ============================================================================
// COLLABORATOR CONTRACTS
// ============================================================================

/// Lookup of registered modules.
pub trait ModuleRegistry: Send + Sync {
    /// Find the registration for an exact `(name, type)` pair.
    fn find(&self, name: &str, module_type: ModuleType) -> Option<ModuleRegistration>;

    /// Every registration, in registration order.
    fn find_all(&self) -> Vec<ModuleRegistration>;
}

/// A resolved module artifact on the local filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub coordinates: ArtifactCoordinates,
    pub location: PathBuf,
}

impl Artifact {
    pub fn new(coordinates: ArtifactCoordinates, location: impl Into<PathBuf>) -> Self {
        Self {
            coordinates,
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("artifact {coordinates} not found at {}", .path.display())]
    NotFound {
        coordinates: ArtifactCoordinates,
        path: PathBuf,
    },
    #[error("failed to resolve artifact {coordinates}")]
    Io {
        coordinates: ArtifactCoordinates,
        #[source]
        source: std::io::Error,
    },
}

/// Turns coordinates into a local artifact, fetching it if necessary.
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, coordinates: &ArtifactCoordinates) -> Result<Artifact, ResolutionError>;
}

/// A configuration property a module declares.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigurationProperty {
    pub id: SmolStr,
    pub short_description: String,
    pub description: String,
    pub default_value: Option<String>,
    /// Values worth suggesting, such as the constants of an enumeration.
    pub value_hints: Vec<String>,
}

impl ConfigurationProperty {
    pub fn new(id: impl Into<SmolStr>, short_description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short_description: short_description.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_hints = hints.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read configuration metadata of {coordinates}")]
    Io {
        coordinates: ArtifactCoordinates,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration metadata in {coordinates}: {reason}")]
    Malformed {
        coordinates: ArtifactCoordinates,
        reason: String,
    },
}

/// Lists the configuration properties an artifact declares.
///
/// Implementations must return properties in a stable order; completion
/// proposals follow it verbatim.
pub trait ModuleConfigurationMetadataResolver: Send + Sync {
    fn list_properties(
        &self,
        artifact: &Artifact,
    ) -> Result<Vec<ConfigurationProperty>, MetadataError>;
}
