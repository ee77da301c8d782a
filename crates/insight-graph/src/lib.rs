//! Insight Graph — Gremlin client for the knowledge graph.
//!
//! All graph reads flow through this crate: queries are built with named
//! bindings, submitted to a Gremlin Server over HTTP, and the returned
//! GraphSON vertices are decoded into `NodeRecord` projections.

pub mod client;
pub mod lookup;
pub mod mock;
pub mod queries;
pub mod raw;

pub use client::{GraphConfig, GraphError, GremlinClient, GremlinExecutor};
pub use lookup::GraphNodeLookup;
pub use queries::{GremlinQuery, NEIGHBOR_EDGE_LIMIT};
pub use raw::{PropertyValue, RawVertex};
