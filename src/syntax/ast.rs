//! Parsed stream definitions.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

/// One pipeline stage, as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDefinition {
    pub name: SmolStr,
    pub label: Option<SmolStr>,
    /// Parameters in first-written order; a repeated key keeps its position
    /// and takes the last value.
    pub parameters: IndexMap<SmolStr, String>,
}

impl ModuleDefinition {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            label: None,
            parameters: IndexMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<SmolStr>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// The label if present, otherwise the module name.
    pub fn label_or_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn has_parameter(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }
}

impl fmt::Display for ModuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        f.write_str(&self.name)?;
        for (key, value) in &self.parameters {
            write!(f, " --{key}={}", DslValue(value))?;
        }
        Ok(())
    }
}

/// A parsed stream: an ordered, non-empty sequence of modules plus optional
/// named destinations at either end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamDefinition {
    pub name: SmolStr,
    pub raw_dsl: String,
    pub modules: Vec<ModuleDefinition>,
    pub source_destination: Option<SmolStr>,
    pub sink_destination: Option<SmolStr>,
}

impl StreamDefinition {
    /// Modules in deployment order, which is always declaration order.
    pub fn deployment_order(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules.iter()
    }

    pub fn last_module(&self) -> Option<&ModuleDefinition> {
        self.modules.last()
    }

    /// Compare everything except the stream name and the raw text.
    pub fn same_topology(&self, other: &StreamDefinition) -> bool {
        self.modules == other.modules
            && self.source_destination == other.source_destination
            && self.sink_destination == other.sink_destination
    }
}

/// Canonical DSL text; parsing it back yields the same topology.
impl fmt::Display for StreamDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(destination) = &self.source_destination {
            write!(f, ":{destination} > ")?;
        }
        for (i, module) in self.modules.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{module}")?;
        }
        if let Some(destination) = &self.sink_destination {
            write!(f, " > :{destination}")?;
        }
        Ok(())
    }
}

/// Displays a parameter value, quoting it when it would not lex back as a
/// single identifier or bare literal.
pub struct DslValue<'a>(pub &'a str);

impl DslValue<'_> {
    fn is_bare(&self) -> bool {
        let mut chars = self.0.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if first.is_whitespace() || matches!(first, '-' | '=' | '>' | ':' | '|' | '\'' | '"') {
            return false;
        }
        // `name:` would come back as a label.
        !self.0.ends_with(':')
            && chars.all(|c| !c.is_whitespace() && !matches!(c, '|' | '\'' | '"' | '=' | '>'))
    }
}

impl fmt::Display for DslValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str(self.0);
        }
        f.write_str("'")?;
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("''")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_display() {
        let module = ModuleDefinition::new("file")
            .with_label("in")
            .with_parameter("mode", "lines")
            .with_parameter("pattern", "*.txt");
        assert_eq!(module.to_string(), "in: file --mode=lines --pattern=*.txt");
    }

    #[test]
    fn test_repeated_parameter_keeps_position() {
        let module = ModuleDefinition::new("file")
            .with_parameter("mode", "lines")
            .with_parameter("pattern", "*.txt")
            .with_parameter("mode", "ref");
        let keys: Vec<_> = module.parameters.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["mode", "pattern"]);
        assert_eq!(module.parameters["mode"], "ref");
    }

    #[test]
    fn test_value_quoting() {
        assert_eq!(DslValue("lines").to_string(), "lines");
        assert_eq!(DslValue("1000").to_string(), "1000");
        assert_eq!(DslValue("").to_string(), "''");
        assert_eq!(DslValue("a b").to_string(), "'a b'");
        assert_eq!(DslValue("it's").to_string(), "'it''s'");
        assert_eq!(DslValue("x|y").to_string(), "'x|y'");
        assert_eq!(DslValue("-1").to_string(), "'-1'");
        assert_eq!(DslValue("key:").to_string(), "'key:'");
        assert_eq!(DslValue(r"a\b").to_string(), r"a\b");
        assert_eq!(DslValue(r"a b\c").to_string(), r"'a b\\c'");
    }

    #[test]
    fn test_stream_display() {
        let stream = StreamDefinition {
            name: "s".into(),
            raw_dsl: String::new(),
            modules: vec![ModuleDefinition::new("filter"), ModuleDefinition::new("log")],
            source_destination: Some("in".into()),
            sink_destination: None,
        };
        assert_eq!(stream.to_string(), ":in > filter | log");
    }
}
