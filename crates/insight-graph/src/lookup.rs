//! Node lookups against the knowledge graph.
//!
//! Two lookup patterns (graph id, external id) and one fixed-depth neighbor
//! expansion. A query that matches nothing is not an error: single lookups
//! return `None`, the expansion returns an empty list. Only failures of the
//! engine call itself are surfaced.

use insight_core::types::display_property_for;
use insight_core::{NodeRecord, EXTERNAL_ID_PROPERTY};

use crate::client::{GraphError, GremlinClient, GremlinExecutor};
use crate::mock;
use crate::queries::{self, GremlinQuery, NEIGHBOR_EDGE_LIMIT};
use crate::raw::RawVertex;

/// Resolves nodes and their neighbors through a Gremlin executor.
#[derive(Clone)]
pub struct GraphNodeLookup<E = GremlinClient> {
    executor: E,
}

impl<E: GremlinExecutor> GraphNodeLookup<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    // ── Single Node Lookups ──────────────────────────────────────

    /// Get a node by its graph-native id.
    pub async fn get_by_graph_id(&self, id: &str) -> Result<Option<NodeRecord>, GraphError> {
        tracing::info!(graph_id = %id, "Looking up node by graph id");
        self.fetch_one(queries::vertex_by_graph_id(id)).await
    }

    /// Get a node by its external correlation id.
    ///
    /// If several vertices share the id, the engine decides which one comes
    /// back.
    pub async fn get_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<NodeRecord>, GraphError> {
        tracing::info!(external_id = %external_id, "Looking up node by external id");
        self.fetch_one(queries::vertex_by_external_id(external_id))
            .await
    }

    // ── Neighbor Queries ─────────────────────────────────────────

    /// Targets of the node's outgoing edges, capped at `NEIGHBOR_EDGE_LIMIT`.
    ///
    /// Only nameable neighbors are returned: vertices of an unmapped type or
    /// without their display property are dropped. Order is whatever the
    /// engine yields.
    pub async fn get_neighbors(&self, node: &NodeRecord) -> Result<Vec<NodeRecord>, GraphError> {
        tracing::info!(graph_id = %node.id, "Expanding outgoing neighbors");
        let rows = self
            .executor
            .submit(&queries::out_neighbors(&node.id))
            .await?;
        let raw_count = rows.len();

        let mut neighbors = Vec::with_capacity(raw_count.min(NEIGHBOR_EDGE_LIMIT));
        for row in rows.into_iter().take(NEIGHBOR_EDGE_LIMIT) {
            let vertex = RawVertex::from_value(row)?;
            if let Some(neighbor) = decode_neighbor(&vertex) {
                neighbors.push(neighbor);
            }
        }

        tracing::debug!(
            graph_id = %node.id,
            raw = raw_count,
            kept = neighbors.len(),
            "Decoded neighbors"
        );
        Ok(neighbors)
    }

    /// Fixed synthetic neighbors; see [`mock::neighbors_mock`].
    pub fn get_neighbors_mock(&self, id: &str) -> Vec<NodeRecord> {
        mock::neighbors_mock(id)
    }

    async fn fetch_one(&self, query: GremlinQuery) -> Result<Option<NodeRecord>, GraphError> {
        let rows = self.executor.submit(&query).await?;
        match rows.into_iter().next() {
            Some(row) => {
                let record = decode_vertex(&RawVertex::from_value(row)?);
                tracing::info!(
                    graph_id = %record.id,
                    node_type = %record.node_type,
                    "Found node"
                );
                Ok(Some(record))
            }
            None => {
                tracing::info!("No node matched");
                Ok(None)
            }
        }
    }
}

/// Project a raw vertex onto a `NodeRecord`.
///
/// The display label is filled only for mapped types whose display property
/// is present; the external id is filled whenever `idMongo` is present.
pub fn decode_vertex(vertex: &RawVertex) -> NodeRecord {
    let display_label =
        display_property_for(&vertex.label).and_then(|key| vertex.first_property(key));

    NodeRecord {
        id: vertex.id_string(),
        external_id: vertex.first_property(EXTERNAL_ID_PROPERTY),
        node_type: vertex.label.clone(),
        display_label,
    }
}

/// Decode a neighbor, keeping it only if it carries a display label.
pub fn decode_neighbor(vertex: &RawVertex) -> Option<NodeRecord> {
    let record = decode_vertex(vertex);
    record.is_nameable().then_some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vertex(v: serde_json::Value) -> RawVertex {
        RawVertex::from_value(v).unwrap()
    }

    #[test]
    fn test_decode_event_scenario() {
        let record = decode_vertex(&vertex(json!({
            "label": "Event",
            "id": "1040",
            "properties": {
                "eventName": [{"value": "Bombing"}],
                "idMongo": [{"value": "m-77"}]
            }
        })));
        assert_eq!(
            record,
            NodeRecord {
                id: "1040".to_string(),
                external_id: Some("m-77".to_string()),
                node_type: "Event".to_string(),
                display_label: Some("Bombing".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_unmapped_type_keeps_external_id() {
        let record = decode_vertex(&vertex(json!({
            "label": "Vehicle",
            "id": 2001,
            "properties": {
                "vehicleName": [{"value": "Truck"}],
                "eventName": [{"value": "Bombing"}],
                "idMongo": [{"value": "m-1"}]
            }
        })));
        assert_eq!(record.id, "2001");
        assert_eq!(record.node_type, "Vehicle");
        assert_eq!(record.display_label, None);
        assert_eq!(record.external_id.as_deref(), Some("m-1"));
    }

    #[test]
    fn test_decode_mapped_type_missing_name() {
        let record = decode_vertex(&vertex(json!({
            "label": "Location",
            "id": 7,
            "properties": {"idMongo": [{"value": "m-7"}]}
        })));
        assert_eq!(record.display_label, None);
        assert_eq!(record.external_id.as_deref(), Some("m-7"));
        assert!(decode_neighbor(&vertex(json!({"label": "Location", "id": 7}))).is_none());
    }

    #[test]
    fn test_decode_neighbor_filters() {
        let named = vertex(json!({
            "label": "Organisation",
            "id": 9,
            "properties": {"organisationName": [{"value": "ACME"}]}
        }));
        let unmapped = vertex(json!({
            "label": "Vehicle",
            "id": 10,
            "properties": {"organisationName": [{"value": "ACME"}]}
        }));
        assert_eq!(
            decode_neighbor(&named).and_then(|n| n.display_label),
            Some("ACME".to_string())
        );
        assert!(decode_neighbor(&unmapped).is_none());
    }
}
