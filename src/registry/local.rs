//! Resolution against a local Maven-layout repository.

use std::path::{Path, PathBuf};

use super::{Artifact, ArtifactCoordinates, ModuleResolver, ResolutionError};

/// Resolves coordinates to files under a local repository root laid out as
/// `<root>/<group as path>/<artifact>/<version>/<artifact>-<version>[-classifier].<ext>`.
///
/// Nothing is downloaded; a missing file is [`ResolutionError::NotFound`].
#[derive(Clone, Debug)]
pub struct LocalRepositoryResolver {
    root: PathBuf,
}

impl LocalRepositoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where an artifact with these coordinates lives, whether or not it exists.
    pub fn path_of(&self, coordinates: &ArtifactCoordinates) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(coordinates.group_id().split('.'));
        path.push(coordinates.artifact_id());
        path.push(coordinates.version());
        path.push(coordinates.file_name());
        path
    }
}

impl ModuleResolver for LocalRepositoryResolver {
    fn resolve(&self, coordinates: &ArtifactCoordinates) -> Result<Artifact, ResolutionError> {
        let path = self.path_of(coordinates);
        match path.metadata() {
            Ok(meta) if meta.is_file() => {
                tracing::debug!(%coordinates, path = %path.display(), "resolved artifact");
                Ok(Artifact::new(coordinates.clone(), path))
            }
            Ok(_) => Err(ResolutionError::NotFound {
                coordinates: coordinates.clone(),
                path,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ResolutionError::NotFound {
                coordinates: coordinates.clone(),
                path,
            }),
            Err(source) => Err(ResolutionError::Io {
                coordinates: coordinates.clone(),
                source,
            }),
        }
    }
}
