//! Directed acyclic graph with forward and reverse adjacency
//!
//! Nodes carry a typed payload per graph kind; `is_a` and mixin
//! relationships both produce plain parent-to-child edges, so the graph
//! does not distinguish them structurally.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Node identifier (normalized term name, unique per graph)
pub type NodeId = String;

/// Directed edge, source = parent or mixin donor, target = child
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,

    /// Synthetic edge identifier; set for predicate edges only
    pub id: Option<String>,
}

/// A DAG with typed node payloads
///
/// Nodes are kept in a sorted map so iteration order (and every list
/// derived from it) is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Dag<N> {
    nodes: BTreeMap<NodeId, N>,

    /// Reverse edges: node -> its parents (is_a targets and mixin donors)
    parents: HashMap<NodeId, Vec<NodeId>>,

    /// Forward edges: node -> its children
    children: HashMap<NodeId, Vec<NodeId>>,

    /// All edges in insertion order
    edges: Vec<Edge>,
}

impl<N> Default for Dag<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Dag<N> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Get a node's payload
    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All node identifiers in sorted order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// All nodes with their payloads, in sorted id order
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &N)> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immediate parents of a node
    pub fn parents(&self, id: &str) -> &[NodeId] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Immediate children of a node
    pub fn children(&self, id: &str) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Reflexive transitive ancestors of the seed nodes
    ///
    /// The union over every seed of {seed} plus every node with a directed
    /// path to the seed. Seeds absent from the graph contribute nothing
    /// (stale search terms during a version switch must not error), and an
    /// empty seed collection yields an empty set.
    pub fn ancestors<I, S>(&self, seeds: I) -> HashSet<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.walk(seeds, &self.parents)
    }

    /// Reflexive transitive descendants of the seed nodes
    ///
    /// Symmetric to [`ancestors`](Self::ancestors), following forward
    /// edges instead of reverse ones.
    pub fn descendants<I, S>(&self, seeds: I) -> HashSet<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.walk(seeds, &self.children)
    }

    fn walk<I, S>(&self, seeds: I, adjacency: &HashMap<NodeId, Vec<NodeId>>) -> HashSet<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        for seed in seeds {
            let seed = seed.as_ref();
            if self.nodes.contains_key(seed) && visited.insert(seed.to_string()) {
                queue.push_back(seed.to_string());
            }
        }

        // BFS over the chosen adjacency direction
        while let Some(current) = queue.pop_front() {
            if let Some(next_ids) = adjacency.get(&current) {
                for next in next_ids {
                    if visited.insert(next.clone()) {
                        queue.push_back(next.clone());
                    }
                }
            }
        }

        visited
    }
}

impl<N: Default> Dag<N> {
    /// Ensure a node exists and return its payload for mutation
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> &mut N {
        self.nodes.entry(id.into()).or_default()
    }

    /// Add a directed edge, creating missing endpoints with default payloads
    ///
    /// Duplicate (source, target) pairs are ignored; a term listing the
    /// same parent under both `is_a` and `mixins` yields a single edge.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        edge_id: Option<String>,
    ) {
        let source = source.into();
        let target = target.into();

        let children = self.children.entry(source.clone()).or_default();
        if children.contains(&target) {
            return;
        }
        children.push(target.clone());
        self.parents
            .entry(target.clone())
            .or_default()
            .push(source.clone());

        self.nodes.entry(source.clone()).or_default();
        self.nodes.entry(target.clone()).or_default();
        self.edges.push(Edge {
            source,
            target,
            id: edge_id,
        });
    }
}

impl<N> Dag<N> {
    /// Remove a node along with every edge touching it
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.remove(id);
        self.parents.remove(id);
        self.children.remove(id);
        for adjacency in [&mut self.parents, &mut self.children] {
            for neighbors in adjacency.values_mut() {
                neighbors.retain(|n| n != id);
            }
        }
        self.edges.retain(|e| e.source != id && e.target != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Dag<()> {
        // root -> a -> c, root -> b -> c
        let mut dag = Dag::new();
        dag.add_edge("root", "a", None);
        dag.add_edge("root", "b", None);
        dag.add_edge("a", "c", None);
        dag.add_edge("b", "c", None);
        dag
    }

    #[test]
    fn ancestors_are_reflexive() {
        let dag = diamond();
        let ancestors = dag.ancestors(["c"]);
        assert!(ancestors.contains("c"));
        assert!(ancestors.contains("a"));
        assert!(ancestors.contains("b"));
        assert!(ancestors.contains("root"));
    }

    #[test]
    fn descendants_are_reflexive() {
        let dag = diamond();
        let descendants = dag.descendants(["a"]);
        assert_eq!(
            descendants,
            ["a", "c"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn multi_seed_lineage_is_a_union() {
        let dag = diamond();
        let ancestors = dag.ancestors(["a", "b"]);
        assert_eq!(
            ancestors,
            ["a", "b", "root"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn unknown_seeds_are_ignored() {
        let dag = diamond();
        assert!(dag.ancestors(["nope"]).is_empty());

        // A mix of known and unknown seeds only counts the known ones
        let ancestors = dag.ancestors(["a", "nope"]);
        assert!(ancestors.contains("a"));
        assert!(ancestors.contains("root"));
        assert!(!ancestors.contains("nope"));
    }

    #[test]
    fn empty_seeds_yield_empty_set() {
        let dag = diamond();
        let none: [&str; 0] = [];
        assert!(dag.ancestors(none).is_empty());
    }

    #[test]
    fn duplicate_edges_are_collapsed() {
        let mut dag: Dag<()> = Dag::new();
        dag.add_edge("a", "b", None);
        dag.add_edge("a", "b", None);
        assert_eq!(dag.edge_count(), 1);
        assert_eq!(dag.parents("b"), ["a".to_string()]);
    }

    #[test]
    fn remove_node_drops_its_edges() {
        let mut dag = diamond();
        dag.remove_node("a");
        assert!(!dag.contains("a"));
        assert!(dag.edges().iter().all(|e| e.source != "a" && e.target != "a"));
        assert_eq!(dag.parents("c"), ["b".to_string()]);
        assert_eq!(dag.children("root"), ["b".to_string()]);
    }
}
