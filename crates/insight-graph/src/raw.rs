//! Decoded shape of a GraphSON vertex.
//!
//! Vertex properties are multi-valued: each key maps to an ordered list of
//! property containers, each holding a `value` (and, on JanusGraph, the
//! property's own id). Only the first container of a key is ever read.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::client::GraphError;

/// One value of a (possibly multi-valued) vertex property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub value: Value,
}

/// A vertex as returned by the graph engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawVertex {
    pub id: Value,
    pub label: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<PropertyValue>>,
}

impl RawVertex {
    /// Decode one element of a result set.
    pub fn from_value(value: Value) -> Result<Self, GraphError> {
        serde_json::from_value(value).map_err(|e| GraphError::Decode(e.to_string()))
    }

    /// The engine-native id as a string (`1040`, not `"1040"`).
    pub fn id_string(&self) -> String {
        scalar_to_string(&self.id).unwrap_or_default()
    }

    /// First value of a property, stringified.
    ///
    /// `None` when the key is missing, has no values, or its first value is
    /// null.
    pub fn first_property(&self, key: &str) -> Option<String> {
        self.properties
            .get(key)
            .and_then(|values| values.first())
            .and_then(|p| scalar_to_string(&p.value))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
