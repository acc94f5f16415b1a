//! Biolink Explorer graphs
//!
//! Compiles a parsed Biolink Model document into the category and
//! predicate DAGs, provides lineage (ancestor/descendant) traversal over
//! them, and projects a DAG into the element records the visualization
//! layer renders.

pub mod builder;
pub mod dag;
pub mod elements;

pub use builder::{
    build_category_graph, build_predicate_graph, CategoryNode, PredicateNode, ROOT_CATEGORY,
    ROOT_PREDICATE,
};
pub use dag::{Dag, Edge, NodeId};
pub use elements::{
    to_elements, EdgeData, EdgeElement, Element, ElementAttributes, NodeData, NodeElement,
    NodeMeta,
};
