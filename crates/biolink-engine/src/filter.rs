//! Multi-criteria element filtering
//!
//! The pipeline the visualization layer runs on every interaction:
//! mixin gating, search highlighting with lineage expansion, and
//! hierarchical domain/range restriction. Inputs are never mutated; the
//! engine derives a fresh element list each call so cached graphs stay
//! pristine.

use std::collections::HashSet;

use biolink_graph::{CategoryNode, Dag, Element, NodeMeta};

/// Styling class marking directly-searched nodes
const SEARCHED_CLASS: &str = "searched";

/// User-selected filter criteria for one interaction
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Domain categories selected for filtering (predicates only)
    pub selected_domains: Vec<String>,

    /// Range categories selected for filtering (predicates only)
    pub selected_ranges: Vec<String>,

    /// Whether mixin nodes should be shown
    pub include_mixins: bool,

    /// Node ids picked in the search dropdown
    pub search_nodes: Vec<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            selected_domains: Vec::new(),
            selected_ranges: Vec::new(),
            include_mixins: true,
            search_nodes: Vec::new(),
        }
    }
}

/// Result of one filter invocation
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub elements: Vec<Element>,

    /// The mixin-inclusion flag actually applied; forced to true when a
    /// searched node is itself a mixin, so the UI control can reflect it
    pub include_mixins: bool,
}

/// Apply the filter pipeline to a graph's element list
///
/// `dag` is the graph being filtered; `category_dag` backs the
/// hierarchical domain/range match and is always the category graph, even
/// when filtering predicates.
pub fn filter_graph<N: NodeMeta>(
    elements: &[Element],
    criteria: &FilterCriteria,
    dag: &Dag<N>,
    category_dag: &Dag<CategoryNode>,
) -> FilterOutcome {
    // A user searching for a mixin must be able to see it, whatever their
    // checkbox said.
    let include_mixins = criteria.include_mixins
        || criteria
            .search_nodes
            .iter()
            .any(|id| dag.node(id).map(NodeMeta::is_mixin).unwrap_or(false));

    let mut relevant: Vec<Element> = if include_mixins {
        elements.to_vec()
    } else {
        remove_mixins(elements)
    };

    // Clear stale search highlights, then annotate the current matches.
    for element in &mut relevant {
        if let Element::Node(node) = element {
            let mut classes: Vec<&str> = node
                .classes
                .split_whitespace()
                .filter(|class| *class != SEARCHED_CLASS)
                .collect();
            if criteria.search_nodes.iter().any(|s| s == &node.data.id) {
                classes.push(SEARCHED_CLASS);
            }
            node.classes = classes.join(" ");
        }
    }

    // Restrict to the searched nodes plus their full lineage.
    if !criteria.search_nodes.is_empty() {
        let mut lineage: HashSet<String> = criteria.search_nodes.iter().cloned().collect();
        lineage.extend(dag.ancestors(&criteria.search_nodes));
        lineage.extend(dag.descendants(&criteria.search_nodes));
        relevant = restrict_to_nodes(&lineage, &relevant);
    }

    // Hierarchical domain/range restriction. A predicate survives when its
    // declared domain lies in the reflexive ancestor set of the selected
    // categories (symmetrically for range); predicates without the
    // attribute always survive.
    if !criteria.selected_domains.is_empty() || !criteria.selected_ranges.is_empty() {
        let selected_domain_set = category_dag.ancestors(&criteria.selected_domains);
        let selected_range_set = category_dag.ancestors(&criteria.selected_ranges);

        let matching: HashSet<String> = relevant
            .iter()
            .filter_map(Element::as_node)
            .filter(|node| {
                let attributes = &node.data.attributes;
                let domain_ok = criteria.selected_domains.is_empty()
                    || attributes
                        .domain
                        .as_ref()
                        .map(|domain| selected_domain_set.contains(domain))
                        .unwrap_or(true);
                let range_ok = criteria.selected_ranges.is_empty()
                    || attributes
                        .range
                        .as_ref()
                        .map(|range| selected_range_set.contains(range))
                        .unwrap_or(true);
                domain_ok && range_ok
            })
            .map(|node| node.data.id.clone())
            .collect();
        relevant = restrict_to_nodes(&matching, &relevant);
    }

    // Lineage expansion may have pulled mixins back in.
    if !include_mixins {
        relevant = remove_mixins(&relevant);
    }

    FilterOutcome {
        elements: relevant,
        include_mixins,
    }
}

/// Drop every mixin node and any edge touching one
pub fn remove_mixins(elements: &[Element]) -> Vec<Element> {
    let non_mixin_ids: HashSet<String> = elements
        .iter()
        .filter_map(Element::as_node)
        .filter(|node| !node.data.attributes.is_mixin)
        .map(|node| node.data.id.clone())
        .collect();

    restrict_to_nodes(&non_mixin_ids, elements)
}

/// Keep only the given nodes and the edges whose endpoints both survive
pub fn restrict_to_nodes(node_ids: &HashSet<String>, elements: &[Element]) -> Vec<Element> {
    let surviving: HashSet<&str> = elements
        .iter()
        .filter_map(Element::node_id)
        .filter(|id| node_ids.contains(*id))
        .collect();

    elements
        .iter()
        .filter(|element| match element {
            Element::Node(node) => surviving.contains(node.data.id.as_str()),
            Element::Edge(edge) => {
                surviving.contains(edge.data.source.as_str())
                    && surviving.contains(edge.data.target.as_str())
            }
        })
        .cloned()
        .collect()
}
