//! Biolink Model YAML document parsing
//!
//! Parses the subset of the Biolink Model schema that the graph builders
//! consume: the `classes` and `slots` collections with their inheritance,
//! mixin, and annotation fields. All other fields in the document are
//! ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or parsing a schema document
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Reading the schema file failed
    #[error("failed to read schema file {0}: {1}")]
    Io(String, String),

    /// The document lacks a required top-level collection
    #[error("schema document is missing the top-level `{0}` collection")]
    MissingSection(&'static str),

    /// The document is not valid YAML or a field has the wrong shape
    #[error("failed to parse schema document: {0}")]
    Parse(String),
}

/// A parsed Biolink Model document (subset of fields we care about)
///
/// `classes` feed the category graph and `slots` feed the predicate graph.
/// Both collections are required: a document without them would compile to
/// an empty graph, which is indistinguishable from "no filters matched" in
/// the UI, so parsing fails fast instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Class definitions (entity hierarchy, including non-category entries)
    pub classes: BTreeMap<String, ClassDefinition>,

    /// Slot definitions (relationship terms, including non-predicate entries)
    pub slots: BTreeMap<String, SlotDefinition>,
}

impl SchemaDocument {
    /// Load a schema document from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Io(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse a schema document from YAML text
    ///
    /// The presence of the `classes` and `slots` mappings is checked before
    /// typed deserialization so the caller gets a descriptive error rather
    /// than a field-level serde message.
    pub fn from_str(yaml: &str) -> Result<Self, SchemaError> {
        let raw: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| SchemaError::Parse(e.to_string()))?;

        for section in ["classes", "slots"] {
            match raw.get(section) {
                Some(serde_yaml::Value::Mapping(_)) => {}
                _ => return Err(SchemaError::MissingSection(section)),
            }
        }

        serde_yaml::from_value(raw).map_err(|e| SchemaError::Parse(e.to_string()))
    }
}

/// A class entry from the `classes` collection
///
/// Only present-if-supplied fields are optional; the boolean flags default
/// to false when absent, matching the document semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Parent term name (strict inheritance)
    #[serde(default)]
    pub is_a: Option<String>,

    /// Mixin term names, treated as additional parents
    #[serde(default)]
    pub mixins: Vec<String>,

    /// Whether this term is itself a mixin
    #[serde(default)]
    pub mixin: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub notes: Option<OneOrMany>,

    #[serde(default)]
    pub aliases: Option<Vec<String>>,
}

/// A slot entry from the `slots` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// Parent term name (strict inheritance)
    #[serde(default)]
    pub is_a: Option<String>,

    /// Mixin term names, treated as additional parents
    #[serde(default)]
    pub mixins: Vec<String>,

    /// Whether this term is itself a mixin
    #[serde(default)]
    pub mixin: bool,

    /// Whether the relationship holds in both directions
    #[serde(default)]
    pub symmetric: bool,

    /// Declared subject category constraint
    #[serde(default)]
    pub domain: Option<String>,

    /// Declared object category constraint
    #[serde(default)]
    pub range: Option<String>,

    /// The reverse form of this predicate, if one exists
    #[serde(default)]
    pub inverse: Option<String>,

    /// Annotations block; the canonical-predicate marker lives here
    #[serde(default)]
    pub annotations: Option<Annotations>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub notes: Option<OneOrMany>,

    #[serde(default)]
    pub aliases: Option<Vec<String>>,
}

impl SlotDefinition {
    /// Whether this slot is explicitly annotated as a canonical predicate
    ///
    /// The marker appears in two encodings across Biolink releases: a
    /// mapping-style block containing a `canonical_predicate` key, and a
    /// list-style block (older releases, e.g. 2.2.1) whose entries carry a
    /// `canonical_predicate` tag, possibly namespaced, with a truthy value.
    pub fn is_canonical_predicate(&self) -> bool {
        match &self.annotations {
            Some(Annotations::Map(map)) => map.contains_key("canonical_predicate"),
            Some(Annotations::List(entries)) => entries.iter().any(|entry| {
                let tagged = matches!(
                    entry.tag.as_deref(),
                    Some("canonical_predicate") | Some("biolink:canonical_predicate")
                );
                tagged && entry.value.as_ref().map(is_truthy).unwrap_or(false)
            }),
            None => false,
        }
    }
}

/// The two annotation-block encodings found in the wild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotations {
    /// `annotations: {canonical_predicate: ...}`
    Map(BTreeMap<String, serde_yaml::Value>),

    /// `annotations: [{tag: canonical_predicate, value: true}, ...]`
    List(Vec<AnnotationEntry>),
}

/// One entry of a list-style annotations block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub value: Option<serde_yaml::Value>,
}

/// A field that may be written as a single scalar or a list
///
/// `notes` in particular appears both ways across schema versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl std::fmt::Display for OneOrMany {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(value) => write!(f, "{}", value),
            Self::Many(values) => write!(f, "{}", values.join("; ")),
        }
    }
}

fn is_truthy(value: &serde_yaml::Value) -> bool {
    use serde_yaml::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(_) => true,
    }
}
