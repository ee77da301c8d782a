//! Gremlin query builder for the knowledge graph.
//!
//! Caller-supplied values are always passed as bindings, never spliced into
//! the script text.

use insight_core::EXTERNAL_ID_PROPERTY;
use serde::Serialize;
use serde_json::{Map, Value};

/// Maximum number of outgoing edges followed when expanding a node.
pub const NEIGHBOR_EDGE_LIMIT: usize = 50;

/// A Gremlin script plus its named bindings.
///
/// Serializes to the Gremlin Server HTTP request body
/// (`{"gremlin": ..., "bindings": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GremlinQuery {
    #[serde(rename = "gremlin")]
    script: String,
    bindings: Map<String, Value>,
}

impl GremlinQuery {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            bindings: Map::new(),
        }
    }

    /// Attach a named binding.
    pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.bindings.insert(name.to_string(), value.into());
        self
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    /// Look up a single binding.
    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

/// Binding value for a graph-native id.
///
/// JanusGraph vertex ids are longs: a numeric string binds as an integer,
/// anything else is passed through as a string.
pub fn graph_id_value(id: &str) -> Value {
    match id.trim().parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(id),
    }
}

/// Select a vertex directly by its graph id.
pub fn vertex_by_graph_id(id: &str) -> GremlinQuery {
    GremlinQuery::new("g.V(vid)").bind("vid", graph_id_value(id))
}

/// Select the first vertex whose `idMongo` property equals `external_id`.
pub fn vertex_by_external_id(external_id: &str) -> GremlinQuery {
    GremlinQuery::new(format!("g.V().has('{EXTERNAL_ID_PROPERTY}', xid).limit(1)"))
        .bind("xid", external_id)
}

/// Targets of the first `NEIGHBOR_EDGE_LIMIT` outgoing edges of a vertex.
pub fn out_neighbors(id: &str) -> GremlinQuery {
    GremlinQuery::new(format!("g.V(vid).outE().limit({NEIGHBOR_EDGE_LIMIT}).inV()"))
        .bind("vid", graph_id_value(id))
}

/// Trivial script used to check that the server answers.
pub fn probe() -> GremlinQuery {
    GremlinQuery::new("g.inject(1)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_graph_id_binding() {
        assert_eq!(graph_id_value("1040"), json!(1040));
        assert_eq!(graph_id_value(" 4112 "), json!(4112));
        assert_eq!(graph_id_value("4r8-3c8-2dh"), json!("4r8-3c8-2dh"));
    }

    #[test]
    fn test_vertex_by_graph_id() {
        let q = vertex_by_graph_id("1040");
        assert_eq!(q.script(), "g.V(vid)");
        assert_eq!(q.binding("vid"), Some(&json!(1040)));
    }

    #[test]
    fn test_vertex_by_external_id_is_bound_not_spliced() {
        let q = vertex_by_external_id("m-77'); g.V().drop(); ('");
        assert_eq!(q.script(), "g.V().has('idMongo', xid).limit(1)");
        assert_eq!(q.binding("xid"), Some(&json!("m-77'); g.V().drop(); ('")));
    }

    #[test]
    fn test_out_neighbors_caps_edges() {
        let q = out_neighbors("8");
        assert_eq!(q.script(), "g.V(vid).outE().limit(50).inV()");
        assert_eq!(q.binding("vid"), Some(&json!(8)));
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(vertex_by_graph_id("12")).unwrap();
        assert_eq!(body, json!({"gremlin": "g.V(vid)", "bindings": {"vid": 12}}));
    }
}
