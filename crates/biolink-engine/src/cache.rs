//! Per-version compiled-graph cache
//!
//! Each schema version is compiled at most once per process; all
//! consumers of a version share the same read-only [`CompiledGraphs`].
//! Version resolution (what document belongs to a tag) is the caller's
//! concern, expressed through the [`SchemaSource`] seam.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use biolink_graph::{
    build_category_graph, build_predicate_graph, to_elements, CategoryNode, Dag, Element,
    PredicateNode,
};
use biolink_model::{SchemaDocument, SchemaError};
use thiserror::Error;

/// Errors produced while populating the cache
#[derive(Error, Debug)]
pub enum CacheError {
    /// The schema source could not produce a document for the version
    #[error("failed to load schema for version {version}: {source}")]
    Source {
        version: String,
        #[source]
        source: SchemaError,
    },
}

/// Resolves a version identifier to its schema document
///
/// External collaborator seam: implementations may read files, hit the
/// network, or serve fixtures. The cache only calls `load` for versions
/// it has not compiled yet.
pub trait SchemaSource {
    fn load(&self, version: &str) -> Result<SchemaDocument, SchemaError>;
}

/// Everything derived from one schema version
///
/// Shared read-only between consumers; the filter engine derives copies
/// and never mutates these.
#[derive(Debug, Clone)]
pub struct CompiledGraphs {
    pub category_dag: Dag<CategoryNode>,
    pub predicate_dag: Dag<PredicateNode>,
    pub category_elements: Vec<Element>,
    pub predicate_elements: Vec<Element>,

    /// Sorted unique category names (also the domain/range option lists)
    pub categories: Vec<String>,

    /// Sorted unique predicate names
    pub predicates: Vec<String>,
}

impl CompiledGraphs {
    /// Compile both DAGs and their derived lists from a schema document
    pub fn compile(schema: &SchemaDocument) -> Self {
        let category_dag = build_category_graph(schema);
        let predicate_dag = build_predicate_graph(schema);
        let category_elements = to_elements(&category_dag);
        let predicate_elements = to_elements(&predicate_dag);
        let categories: Vec<String> = category_dag.node_ids().cloned().collect();
        let predicates: Vec<String> = predicate_dag.node_ids().cloned().collect();
        tracing::info!(
            categories = categories.len(),
            predicates = predicates.len(),
            "compiled schema graphs"
        );

        Self {
            category_dag,
            predicate_dag,
            category_elements,
            predicate_elements,
            categories,
            predicates,
        }
    }

    /// Domain dropdown options (category names)
    pub fn domains(&self) -> &[String] {
        &self.categories
    }

    /// Range dropdown options (category names)
    pub fn ranges(&self) -> &[String] {
        &self.categories
    }
}

type Slot = Arc<Mutex<Option<Arc<CompiledGraphs>>>>;

/// Version-keyed cache of compiled graphs
///
/// Single-flight per key: the registry lock is held only to acquire a
/// per-version slot, and the slot lock is held across compilation, so two
/// concurrent requests for the same uncached version trigger exactly one
/// compile while requests for other versions proceed.
#[derive(Debug, Default)]
pub struct VersionCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled graphs for a version, compiling on first use
    ///
    /// A failed load leaves the slot empty, so a later request retries.
    pub fn get<S: SchemaSource>(
        &self,
        version: &str,
        source: &S,
    ) -> Result<Arc<CompiledGraphs>, CacheError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.entry(version.to_string()).or_default().clone()
        };

        let mut entry = slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(compiled) = entry.as_ref() {
            return Ok(Arc::clone(compiled));
        }

        tracing::info!(version, "compiling schema graphs for uncached version");
        let schema = source.load(version).map_err(|e| CacheError::Source {
            version: version.to_string(),
            source: e,
        })?;
        let compiled = Arc::new(CompiledGraphs::compile(&schema));
        *entry = Some(Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Whether a version has already been compiled
    pub fn contains(&self, version: &str) -> bool {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .get(version)
            .map(|slot| slot.lock().unwrap_or_else(|e| e.into_inner()).is_some())
            .unwrap_or(false)
    }
}

/// Pick the published tag for a bare version number
///
/// Biolink tags sometimes carry a `v` prefix; prefer the prefixed form
/// when the supplied tag list has it, otherwise use the version as given.
pub fn resolve_tag(version: &str, tags: &[String]) -> String {
    let prefixed = format!("v{version}");
    if tags.iter().any(|tag| tag == &prefixed) {
        prefixed
    } else {
        version.to_string()
    }
}
