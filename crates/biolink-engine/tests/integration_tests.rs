//! End-to-end tests over a representative schema fixture
//!
//! Drives the full path the application takes: parse the YAML document,
//! compile it through the version cache, and run filter interactions
//! against the compiled element lists.

use std::sync::Arc;

use biolink_engine::{
    filter_graph, CompiledGraphs, FilterCriteria, SchemaSource, VersionCache,
};
use biolink_graph::{Element, NodeMeta, ROOT_CATEGORY, ROOT_PREDICATE};
use biolink_model::{SchemaDocument, SchemaError};

const FIXTURE: &str = include_str!("fixtures/biolink-model.yaml");

struct FixtureSource;

impl SchemaSource for FixtureSource {
    fn load(&self, _version: &str) -> Result<SchemaDocument, SchemaError> {
        SchemaDocument::from_str(FIXTURE)
    }
}

fn compiled() -> Arc<CompiledGraphs> {
    let cache = VersionCache::new();
    cache.get("v4.1.0", &FixtureSource).unwrap()
}

fn node_ids(elements: &[Element]) -> Vec<&str> {
    elements.iter().filter_map(Element::node_id).collect()
}

#[test]
fn category_graph_covers_the_hierarchy_and_prunes_the_rest() {
    let compiled = compiled();
    let dag = &compiled.category_dag;

    assert!(dag.contains("NamedThing"));
    assert!(dag.contains("DiseaseOrPhenotypicFeature"));
    assert!(dag.contains("SmallMolecule"));
    assert!(dag.contains("ThingWithTaxon")); // mixin, kept without a root path
    assert!(!dag.contains("Attribute"));
    assert!(!dag.contains("Annotation"));

    // Every retained non-mixin node reaches the root reflexively
    for (id, node) in dag.nodes() {
        if !node.is_mixin() {
            assert!(
                dag.ancestors([id.as_str()]).contains(ROOT_CATEGORY),
                "{id} should reach {ROOT_CATEGORY}"
            );
        }
    }
}

#[test]
fn predicate_graph_keeps_canonical_forms_only() {
    let compiled = compiled();
    let dag = &compiled.predicate_dag;

    // No inverse declared: canonical by default
    assert!(dag.contains("has_phenotype"));
    // Mapping-style and list-style canonical annotations both recognized
    assert!(dag.contains("affects"));
    assert!(dag.contains("treats"));
    // Their reverse forms are excluded
    assert!(!dag.contains("affected_by"));
    assert!(!dag.contains("treated_by"));
    // Non-predicate slots are pruned
    assert!(!dag.contains("node_property"));
    assert!(!dag.contains("name"));

    for (id, node) in dag.nodes() {
        if !node.is_mixin() {
            assert!(
                dag.ancestors([id.as_str()]).contains(ROOT_PREDICATE),
                "{id} should reach {ROOT_PREDICATE}"
            );
        }
    }
}

#[test]
fn predicate_metadata_is_normalized() {
    let compiled = compiled();
    let has_phenotype = compiled.predicate_dag.node("has_phenotype").unwrap();
    assert_eq!(
        has_phenotype.domain.as_deref(),
        Some("DiseaseOrPhenotypicFeature")
    );
    assert_eq!(has_phenotype.range.as_deref(), Some("PhenotypicFeature"));
    assert!(!has_phenotype.is_unspecific());

    let related_to = compiled.predicate_dag.node("related_to").unwrap();
    assert!(related_to.is_symmetric);
    assert!(related_to.is_unspecific());
}

#[test]
fn element_classes_mark_mixins_and_unspecific_predicates() {
    let compiled = compiled();
    let classes_of = |id: &str| {
        compiled
            .predicate_elements
            .iter()
            .filter_map(Element::as_node)
            .find(|n| n.data.id == id)
            .map(|n| n.classes.clone())
            .unwrap()
    };

    assert_eq!(classes_of("regulates"), "mixin unspecific");
    assert_eq!(classes_of("related_to"), "unspecific");
    assert_eq!(classes_of("has_phenotype"), "");
}

#[test]
fn option_lists_are_sorted_and_unique() {
    let compiled = compiled();
    let mut sorted = compiled.categories.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(compiled.categories, sorted);
    assert_eq!(compiled.domains(), compiled.categories.as_slice());
    assert_eq!(compiled.ranges(), compiled.categories.as_slice());

    assert!(compiled
        .predicates
        .iter()
        .all(|p| compiled.predicate_dag.contains(p)));
}

#[test]
fn filter_interaction_over_compiled_elements() {
    let compiled = compiled();

    // Domain filter: treats is scoped to ChemicalEntity
    let criteria = FilterCriteria {
        selected_domains: vec!["SmallMolecule".to_string()],
        ..Default::default()
    };
    let outcome = filter_graph(
        &compiled.predicate_elements,
        &criteria,
        &compiled.predicate_dag,
        &compiled.category_dag,
    );
    let ids = node_ids(&outcome.elements);
    // ChemicalEntity is an ancestor of the selected SmallMolecule
    assert!(ids.contains(&"treats"));
    // DiseaseOrPhenotypicFeature is not
    assert!(!ids.contains(&"has_phenotype"));

    // Search for a mixin with mixins excluded: the override kicks in
    let criteria = FilterCriteria {
        include_mixins: false,
        search_nodes: vec!["regulates".to_string()],
        ..Default::default()
    };
    let outcome = filter_graph(
        &compiled.predicate_elements,
        &criteria,
        &compiled.predicate_dag,
        &compiled.category_dag,
    );
    assert!(outcome.include_mixins);
    let ids = node_ids(&outcome.elements);
    assert!(ids.contains(&"regulates"));
    assert!(ids.contains(&"positively_regulates")); // descendant of the mixin
}

#[test]
fn filtering_leaves_the_cached_elements_untouched() {
    let cache = VersionCache::new();
    let first = cache.get("v4.1.0", &FixtureSource).unwrap();
    let before = first.predicate_elements.clone();

    let criteria = FilterCriteria {
        include_mixins: false,
        search_nodes: vec!["has_phenotype".to_string()],
        ..Default::default()
    };
    let _ = filter_graph(
        &first.predicate_elements,
        &criteria,
        &first.predicate_dag,
        &first.category_dag,
    );

    let again = cache.get("v4.1.0", &FixtureSource).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(again.predicate_elements, before);
}

#[test]
fn elements_serialize_to_the_renderer_shape() {
    let compiled = compiled();
    let json = serde_json::to_value(&compiled.category_elements).unwrap();
    let nodes: Vec<&serde_json::Value> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["data"].get("id").is_some())
        .collect();
    let edges: Vec<&serde_json::Value> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["data"].get("source").is_some())
        .collect();

    assert_eq!(
        nodes.len(),
        compiled.category_dag.node_count(),
        "one record per node"
    );
    assert_eq!(edges.len(), compiled.category_dag.edge_count());
    for node in nodes {
        assert_eq!(node["data"]["id"], node["data"]["label"]);
        assert!(node["data"]["attributes"].get("id").is_none());
    }
}
