//! Biolink Model document types
//!
//! Parses the Biolink Model YAML document into typed records and provides
//! the name normalization used for graph node identifiers.

pub mod names;
pub mod schema;

pub use schema::{
    AnnotationEntry, Annotations, ClassDefinition, OneOrMany, SchemaDocument, SchemaError,
    SlotDefinition,
};
