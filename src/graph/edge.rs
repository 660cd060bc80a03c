use serde::{Deserialize, Serialize};

/// A directed connection from one node's source handle to another node's
/// target handle.
///
/// Invariants maintained by [`crate::graph::GraphStore`]: both endpoints
/// reference live nodes, at most one edge terminates at a given
/// `(target, target_handle)` pair, and source and target are never the
/// same node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
}

impl Edge {
    /// True when the edge touches the given node on either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
