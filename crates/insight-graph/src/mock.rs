//! Offline stand-in for the neighbor lookup, for UI work without a graph.

use insight_core::{NodeRecord, NodeType};
use uuid::Uuid;

const MOCK_NEIGHBORS: [(NodeType, &str); 4] = [
    (NodeType::Biographics, "Paul"),
    (NodeType::Event, "Bombing"),
    (NodeType::Equipment, "Gun"),
    (NodeType::RawData, "Tweet"),
];

/// Four fixed neighbors with freshly generated ids. The requested id is
/// ignored.
pub fn neighbors_mock(_id: &str) -> Vec<NodeRecord> {
    MOCK_NEIGHBORS
        .iter()
        .map(|(node_type, name)| NodeRecord {
            id: Uuid::new_v4().to_string(),
            external_id: None,
            node_type: node_type.label().to_string(),
            display_label: Some((*name).to_string()),
        })
        .collect()
}
