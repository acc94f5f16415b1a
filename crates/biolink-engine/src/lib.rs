//! Biolink Explorer engine
//!
//! The per-version compiled-graph cache and the multi-criteria element
//! filter the visualization layer calls on every user interaction.

pub mod cache;
pub mod filter;

pub use cache::{resolve_tag, CacheError, CompiledGraphs, SchemaSource, VersionCache};
pub use filter::{filter_graph, remove_mixins, restrict_to_nodes, FilterCriteria, FilterOutcome};
