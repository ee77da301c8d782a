//! insight-core: Shared types, configuration, and error handling for Insight.
//!
//! This crate provides the foundational pieces used by the graph client and
//! the lookup CLI:
//! - `NodeRecord`, the projection of a graph vertex handed to callers
//! - `NodeType` and its display-property table
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::InsightError;
pub use types::{NodeRecord, NodeType, EXTERNAL_ID_PROPERTY};
