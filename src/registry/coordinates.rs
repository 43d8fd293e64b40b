//! Maven-style artifact coordinates.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// Error returned when a coordinates string is malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoordinatesError {
    #[error("invalid coordinates '{0}': expected group:artifact[:extension[:classifier]]:version")]
    WrongShape(String),
    #[error("invalid coordinates '{input}': {part} must not be empty")]
    EmptyPart { input: String, part: &'static str },
}

/// Coordinates of a module artifact:
/// `group:artifact[:extension[:classifier]]:version`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinates {
    group_id: SmolStr,
    artifact_id: SmolStr,
    extension: SmolStr,
    classifier: SmolStr,
    version: SmolStr,
}

impl ArtifactCoordinates {
    pub const DEFAULT_EXTENSION: &'static str = "jar";
    pub const EMPTY_CLASSIFIER: &'static str = "";

    /// Coordinates with the default extension and no classifier.
    pub fn new(
        group_id: impl Into<SmolStr>,
        artifact_id: impl Into<SmolStr>,
        version: impl Into<SmolStr>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            extension: SmolStr::new_static(Self::DEFAULT_EXTENSION),
            classifier: SmolStr::new_static(Self::EMPTY_CLASSIFIER),
            version: version.into(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<SmolStr>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<SmolStr>) -> Self {
        self.classifier = classifier.into();
        self
    }

    pub fn parse(input: &str) -> Result<Self, CoordinatesError> {
        let parts: Vec<&str> = input.trim().split(':').collect();
        let (group, artifact, extension, classifier, version) = match parts.as_slice() {
            [g, a, v] => (*g, *a, Self::DEFAULT_EXTENSION, Self::EMPTY_CLASSIFIER, *v),
            [g, a, e, v] => (*g, *a, *e, Self::EMPTY_CLASSIFIER, *v),
            [g, a, e, c, v] => (*g, *a, *e, *c, *v),
            _ => return Err(CoordinatesError::WrongShape(input.to_owned())),
        };
        for (part, value) in [
            ("group id", group),
            ("artifact id", artifact),
            ("extension", extension),
            ("version", version),
        ] {
            if value.is_empty() {
                return Err(CoordinatesError::EmptyPart {
                    input: input.to_owned(),
                    part,
                });
            }
        }
        Ok(Self::new(group, artifact, version)
            .with_extension(extension)
            .with_classifier(classifier))
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// File name of the artifact inside its version directory.
    pub fn file_name(&self) -> String {
        if self.classifier.is_empty() {
            format!("{}-{}.{}", self.artifact_id, self.version, self.extension)
        } else {
            format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, self.classifier, self.extension
            )
        }
    }
}

impl FromStr for ArtifactCoordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GROUP_ID: &str = "org.example.stream.module";
    const ARTIFACT_ID: &str = "time-source";
    const VERSION: &str = "2.0.0";

    #[rstest]
    #[case("org.example.stream.module:time-source:2.0.0", "jar", "")]
    #[case("org.example.stream.module:time-source:zip:2.0.0", "zip", "")]
    #[case("org.example.stream.module:time-source:jar:exec:2.0.0", "jar", "exec")]
    fn test_parse(#[case] input: &str, #[case] extension: &str, #[case] classifier: &str) {
        let coordinates = ArtifactCoordinates::parse(input).unwrap();
        assert_eq!(coordinates.group_id(), GROUP_ID);
        assert_eq!(coordinates.artifact_id(), ARTIFACT_ID);
        assert_eq!(coordinates.version(), VERSION);
        assert_eq!(coordinates.extension(), extension);
        assert_eq!(coordinates.classifier(), classifier);
        assert_eq!(ArtifactCoordinates::parse(&coordinates.to_string()).unwrap(), coordinates);
    }

    #[test]
    fn test_defaults_match_explicit() {
        let explicit = ArtifactCoordinates::new(GROUP_ID, ARTIFACT_ID, VERSION)
            .with_extension(ArtifactCoordinates::DEFAULT_EXTENSION)
            .with_classifier(ArtifactCoordinates::EMPTY_CLASSIFIER);
        assert_eq!(explicit, ArtifactCoordinates::new(GROUP_ID, ARTIFACT_ID, VERSION));
    }

    #[rstest]
    #[case("time-source")]
    #[case("a:b")]
    #[case("a:b:c:d:e:f")]
    fn test_parse_wrong_shape(#[case] input: &str) {
        assert!(matches!(
            ArtifactCoordinates::parse(input),
            Err(CoordinatesError::WrongShape(_))
        ));
    }

    #[test]
    fn test_parse_empty_part() {
        assert!(matches!(
            ArtifactCoordinates::parse("org.example::1.0"),
            Err(CoordinatesError::EmptyPart { part: "artifact id", .. })
        ));
    }

    #[test]
    fn test_file_name() {
        let plain = ArtifactCoordinates::new("g", "log-sink", "1.0");
        assert_eq!(plain.file_name(), "log-sink-1.0.jar");
        assert_eq!(plain.with_classifier("exec").file_name(), "log-sink-1.0-exec.jar");
    }
}
