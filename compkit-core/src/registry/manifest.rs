//! Component manifest parsing (component.yml)
//!
//! The manifest declares a component's dependencies under the
//! `needs` key. Everything about it is lenient: a missing key or a
//! value that is not a sequence means "no dependencies", never an
//! error.

/// File name suffix identifying a component's manifest
pub const MANIFEST_FILENAME: &str = "component.yml";

/// A parsed component manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentManifest {
    /// Names of components this one depends on, in declared order
    pub needs: Vec<String>,
}

impl ComponentManifest {
    /// Parse a manifest from YAML text.
    ///
    /// Only the `needs` key is interpreted; any other content is
    /// ignored. Errors are raised only for YAML that does not parse
    /// at all - the caller decides whether that is fatal.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(content)?;

        let needs = value
            .get("needs")
            .and_then(|needs| needs.as_sequence())
            .map(|sequence| {
                sequence
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { needs })
    }
}
