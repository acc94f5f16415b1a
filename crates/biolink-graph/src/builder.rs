//! Schema-to-graph compilation
//!
//! Builds the category DAG from `classes` and the predicate DAG from
//! `slots`. Both builders work in two passes: add every entry broadly
//! (parent and mixin references may point at terms that are not real
//! categories/predicates), then prune nodes that neither reach the
//! designated root through their ancestor chain nor are mixins
//! themselves.

use std::collections::BTreeSet;

use crate::dag::{Dag, NodeId};
use crate::elements::{ElementAttributes, NodeMeta};
use biolink_model::{names, OneOrMany, SchemaDocument};

/// Root of the category hierarchy
pub const ROOT_CATEGORY: &str = "NamedThing";

/// Root of the predicate hierarchy
pub const ROOT_PREDICATE: &str = "related_to";

/// Payload of a category graph node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryNode {
    pub is_mixin: bool,
    pub description: Option<String>,
    pub notes: Option<OneOrMany>,
    pub aliases: Option<Vec<String>>,
}

impl NodeMeta for CategoryNode {
    fn is_mixin(&self) -> bool {
        self.is_mixin
    }

    fn attributes(&self) -> ElementAttributes {
        ElementAttributes {
            is_mixin: self.is_mixin,
            description: self.description.clone(),
            notes: self.notes.clone(),
            aliases: self.aliases.clone(),
            ..Default::default()
        }
    }
}

/// Payload of a predicate graph node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateNode {
    pub is_mixin: bool,
    pub is_symmetric: bool,

    /// Declared subject category, normalized to its category name
    pub domain: Option<String>,

    /// Declared object category, normalized to its category name
    pub range: Option<String>,

    pub description: Option<String>,
    pub notes: Option<OneOrMany>,
    pub aliases: Option<Vec<String>>,
}

impl NodeMeta for PredicateNode {
    fn is_mixin(&self) -> bool {
        self.is_mixin
    }

    fn attributes(&self) -> ElementAttributes {
        ElementAttributes {
            is_mixin: self.is_mixin,
            is_symmetric: Some(self.is_symmetric),
            domain: self.domain.clone(),
            range: self.range.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
            aliases: self.aliases.clone(),
        }
    }

    fn is_unspecific(&self) -> bool {
        let unconstrained =
            |value: &Option<String>| value.as_deref().map_or(true, |v| v == ROOT_CATEGORY);
        unconstrained(&self.domain) && unconstrained(&self.range)
    }
}

/// Build the category DAG from the document's `classes` collection
pub fn build_category_graph(schema: &SchemaDocument) -> Dag<CategoryNode> {
    tracing::info!("building category graph");
    let mut dag: Dag<CategoryNode> = Dag::new();

    for (term, class) in &schema.classes {
        let name = names::to_category_name(term);

        if let Some(parent_term) = &class.is_a {
            dag.add_edge(names::to_category_name(parent_term), name.clone(), None);
        }
        // Mixin donors produce the same directed edge shape as is_a
        let mixin_parents: BTreeSet<String> = class
            .mixins
            .iter()
            .map(|m| names::to_category_name(m))
            .collect();
        for mixin_parent in mixin_parents {
            dag.add_edge(mixin_parent, name.clone(), None);
        }

        let node = dag.add_node(name);
        node.is_mixin = class.mixin;
        node.description = class.description.clone();
        node.notes = class.notes.clone();
        node.aliases = class.aliases.clone();
    }

    // Biolink 'classes' includes entries that are not categories
    prune_unrooted(&mut dag, ROOT_CATEGORY);
    dag
}

/// Build the predicate DAG from the document's `slots` collection
///
/// Only canonical predicates are included: slots either explicitly
/// annotated canonical or declaring no inverse. A slot with an inverse
/// and no canonical annotation is the reverse form of another predicate
/// and would duplicate its semantics.
pub fn build_predicate_graph(schema: &SchemaDocument) -> Dag<PredicateNode> {
    tracing::info!("building predicate graph");
    let mut dag: Dag<PredicateNode> = Dag::new();

    for (term, slot) in &schema.slots {
        if !slot.is_canonical_predicate() && slot.inverse.is_some() {
            continue;
        }
        let name = names::to_predicate_name(term);

        {
            let node = dag.add_node(name.clone());
            node.is_symmetric = slot.symmetric;
            node.is_mixin = slot.mixin;
            node.domain = slot.domain.as_deref().map(names::to_category_name);
            node.range = slot.range.as_deref().map(names::to_category_name);
            node.description = slot.description.clone();
            node.notes = slot.notes.clone();
            node.aliases = slot.aliases.clone();
        }

        if let Some(parent_term) = &slot.is_a {
            let parent = names::to_predicate_name(parent_term);
            let edge_id = format!("{parent}--{name}");
            dag.add_edge(parent, name.clone(), Some(edge_id));
        }
        let mixin_parents: BTreeSet<String> = slot
            .mixins
            .iter()
            .map(|m| names::to_predicate_name(m))
            .collect();
        for mixin_parent in mixin_parents {
            let edge_id = format!("{mixin_parent}--{name}");
            dag.add_edge(mixin_parent, name.clone(), Some(edge_id));
        }
    }

    // Biolink 'slots' includes entries that are not predicates
    prune_unrooted(&mut dag, ROOT_PREDICATE);
    dag
}

/// Drop every node that neither has the root in its reflexive ancestor
/// set nor is itself a mixin
fn prune_unrooted<N: NodeMeta>(dag: &mut Dag<N>, root: &str) {
    let doomed: Vec<NodeId> = dag
        .nodes()
        .filter(|(id, node)| {
            !node.is_mixin() && !dag.ancestors([id.as_str()]).contains(root)
        })
        .map(|(id, _)| id.clone())
        .collect();

    for id in &doomed {
        dag.remove_node(id);
    }
    tracing::debug!(root, removed = doomed.len(), "pruned unrooted nodes");
}
