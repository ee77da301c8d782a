//! Core domain types for the Insight knowledge graph.
//!
//! Vertices in the graph are loosely schematized: any label may appear, and
//! properties are optional. Only a closed set of vertex types carries a
//! human-readable name, looked up through a static property table.

use serde::{Deserialize, Serialize};

/// Vertex property holding the correlation id of the matching document-store
/// record.
pub const EXTERNAL_ID_PROPERTY: &str = "idMongo";

// ── Node Types ────────────────────────────────────────────────────

/// Vertex labels that carry a display name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeType {
    Biographics,
    Event,
    Equipment,
    Location,
    RawData,
    Organisation,
}

/// Label and display property for every known type.
static DISPLAY_PROPERTIES: [(NodeType, &str, &str); 6] = [
    (NodeType::Biographics, "Biographics", "biographicsName"),
    (NodeType::Event, "Event", "eventName"),
    (NodeType::Equipment, "Equipment", "equipmentName"),
    (NodeType::Location, "Location", "locationName"),
    (NodeType::RawData, "RawData", "rawDataName"),
    (NodeType::Organisation, "Organisation", "organisationName"),
];

impl NodeType {
    /// All known types, in table order.
    pub const ALL: [NodeType; 6] = [
        NodeType::Biographics,
        NodeType::Event,
        NodeType::Equipment,
        NodeType::Location,
        NodeType::RawData,
        NodeType::Organisation,
    ];

    /// Resolve a vertex label. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        DISPLAY_PROPERTIES
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(t, _, _)| *t)
    }

    /// The vertex label for this type.
    pub fn label(self) -> &'static str {
        self.entry().1
    }

    /// The vertex property holding this type's display name.
    pub fn display_property(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (NodeType, &'static str, &'static str) {
        // Rows follow variant declaration order.
        &DISPLAY_PROPERTIES[self as usize]
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display property key for a raw vertex label, `None` for unmapped labels.
pub fn display_property_for(label: &str) -> Option<&'static str> {
    NodeType::from_label(label).map(NodeType::display_property)
}

// ── Node Record ───────────────────────────────────────────────────

/// Read-only projection of a graph vertex.
///
/// Serialized with the field names the web UI expects
/// (`id`, `idMongo`, `type`, `label`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeRecord {
    /// Graph-native vertex id, stringified.
    pub id: String,
    /// Correlation id stored in the `idMongo` vertex property.
    #[serde(rename = "idMongo", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Vertex label, verbatim.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Human-readable name taken from the type's display property.
    #[serde(rename = "label", default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
}

impl NodeRecord {
    /// A record carrying only a graph id, enough to start a neighbor lookup.
    pub fn with_graph_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external_id: None,
            node_type: String::new(),
            display_label: None,
        }
    }

    /// The known type of this record, if any.
    pub fn known_type(&self) -> Option<NodeType> {
        NodeType::from_label(&self.node_type)
    }

    /// True when the record carries a display label.
    pub fn is_nameable(&self) -> bool {
        self.display_label.is_some()
    }
}
