//! Visualization-element projection
//!
//! Flattens a DAG into the node/edge records the rendering layer consumes
//! (one `data` payload per element, plus a space-separated `classes`
//! string driving node styling). Structural fields (`id`, `source`,
//! `target`) are kept out of the attribute payload.

use serde::{Deserialize, Serialize};

use crate::dag::{Dag, NodeId};
use biolink_model::OneOrMany;

/// Where the two graph kinds diverge: mixin flag, displayable attributes,
/// and the specificity rule behind the "unspecific" styling class.
pub trait NodeMeta {
    fn is_mixin(&self) -> bool;

    /// The non-structural fields shown in the node detail panel
    fn attributes(&self) -> ElementAttributes;

    /// Whether the node carries no discriminating type constraint
    ///
    /// Only meaningful for predicates; categories are never unspecific.
    fn is_unspecific(&self) -> bool {
        false
    }

    /// The space-separated styling classes for this node
    fn classes(&self) -> String {
        let mut classes = Vec::new();
        if self.is_mixin() {
            classes.push("mixin");
        }
        if self.is_unspecific() {
            classes.push("unspecific");
        }
        classes.join(" ")
    }
}

/// Non-structural node fields carried on an element
///
/// One optional-field record covers both graph kinds: `is_symmetric`,
/// `domain`, and `range` are only set for predicate nodes, and the
/// descriptive fields only when the schema supplied them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementAttributes {
    pub is_mixin: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_symmetric: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<OneOrMany>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

/// A visualization element: either a node or an edge record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Node(NodeElement),
    Edge(EdgeElement),
}

impl Element {
    pub fn as_node(&self) -> Option<&NodeElement> {
        match self {
            Self::Node(node) => Some(node),
            Self::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeElement> {
        match self {
            Self::Node(_) => None,
            Self::Edge(edge) => Some(edge),
        }
    }

    /// The node id, when this element is a node
    pub fn node_id(&self) -> Option<&str> {
        self.as_node().map(|n| n.data.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeElement {
    pub data: NodeData,

    /// Space-separated styling classes ("mixin", "unspecific", "searched")
    #[serde(default)]
    pub classes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub label: String,
    pub attributes: ElementAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeElement {
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Synthetic edge identifier; predicate edges only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub source: NodeId,
    pub target: NodeId,
}

/// Project a DAG into its visualization-element list, nodes first
pub fn to_elements<N: NodeMeta>(dag: &Dag<N>) -> Vec<Element> {
    let mut elements: Vec<Element> = dag
        .nodes()
        .map(|(id, node)| {
            Element::Node(NodeElement {
                data: NodeData {
                    id: id.clone(),
                    label: id.clone(),
                    attributes: node.attributes(),
                },
                classes: node.classes(),
            })
        })
        .collect();

    elements.extend(dag.edges().iter().map(|edge| {
        Element::Edge(EdgeElement {
            data: EdgeData {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            },
        })
    }));

    elements
}
