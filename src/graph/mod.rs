//! The mutable node/edge store at the heart of the engine.
//!
//! All mutation operations are synchronous and total: an unknown id is a
//! no-op, never an error, since callers pass ids obtained from a live
//! hit-test or a previous store call. Every operation leaves the store
//! satisfying the structural invariants (no dangling edges, at most one
//! edge per target handle, no self-loops).

mod edge;
mod node;

pub mod config;

pub use config::{DataKind, NodeSpec, Port, PortDirection, node_spec};
pub use edge::Edge;
pub use node::{ImagePayload, Node, NodeData, NodeType, Point, PromptTab, StructuredPrompt};

use uuid::Uuid;

/// Generates a fresh, collision-free node id.
pub fn fresh_node_id() -> String {
    format!("node-{}", Uuid::new_v4())
}

/// Generates a fresh, collision-free edge id.
pub fn fresh_edge_id() -> String {
    format!("edge-{}", Uuid::new_v4())
}

/// Owns the live node and edge collections. Pure data plus mutation
/// operations; geometry and rendering concerns live elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The edge terminating at `(target, target_handle)`, if any. By the
    /// single-incoming invariant there is at most one.
    pub fn incoming_edge(&self, target: &str, target_handle: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.target == target && e.target_handle == target_handle)
    }

    /// The first edge leaving `(source, source_handle)`. Source handles may
    /// fan out, so more than one can exist; callers that care about all of
    /// them should filter `edges()` themselves.
    pub fn outgoing_edge(&self, source: &str, source_handle: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.source_handle == source_handle)
    }

    /// Adds a node of the given type at a position, seeding the type's
    /// default data (label from the config table, default brush size, and
    /// a 1:1 aspect ratio for generators). Returns the fresh id.
    pub fn add_node(&mut self, node_type: NodeType, position: Point) -> String {
        let spec = node_spec(node_type);
        let mut data = NodeData {
            label: spec.label.to_string(),
            brush_size: Some(20),
            ..NodeData::default()
        };
        if node_type == NodeType::Generator {
            data.aspect_ratio = Some("1:1".to_string());
        }
        self.add_node_with_data(node_type, position, data)
    }

    /// Adds a node with caller-supplied data. Used by auto-wiring and by
    /// template instantiation, which bring their own data bags.
    pub fn add_node_with_data(
        &mut self,
        node_type: NodeType,
        position: Point,
        data: NodeData,
    ) -> String {
        let id = fresh_node_id();
        self.nodes.push(Node {
            id: id.clone(),
            node_type,
            position,
            data,
        });
        id
    }

    /// Removes a node and every edge touching it. No-op for unknown ids.
    /// No dangling edge is observable after this returns.
    pub fn delete_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| !e.touches(id));
    }

    /// Applies a partial update to a node's data bag. No-op for unknown ids.
    pub fn update_node_data(&mut self, id: &str, update: impl FnOnce(&mut NodeData)) {
        if let Some(node) = self.node_mut(id) {
            update(&mut node.data);
        }
    }

    /// Connects `(source, source_handle)` to `(target, target_handle)`.
    ///
    /// Self-loops and edges to unknown nodes are rejected (returns `None`
    /// with no mutation). An existing edge at the same target handle is
    /// replaced, last write wins. Returns the new edge's id on success.
    pub fn add_edge(
        &mut self,
        source: &str,
        source_handle: &str,
        target: &str,
        target_handle: &str,
    ) -> Option<String> {
        if source == target {
            return None;
        }
        if self.node(source).is_none() || self.node(target).is_none() {
            return None;
        }
        self.edges
            .retain(|e| !(e.target == target && e.target_handle == target_handle));
        let id = fresh_edge_id();
        self.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            source_handle: source_handle.to_string(),
            target: target.to_string(),
            target_handle: target_handle.to_string(),
        });
        Some(id)
    }

    /// Removes an edge by id. No-op for unknown ids.
    pub fn delete_edge(&mut self, id: &str) {
        self.edges.retain(|e| e.id != id);
    }

    /// Replaces the whole graph, used when loading a saved session.
    pub fn replace(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes = nodes;
        self.edges = edges;
    }

    /// Unions additional nodes and edges into the live graph, used when
    /// instantiating a workflow template. The caller is responsible for
    /// id freshness.
    pub fn extend(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes.extend(nodes);
        self.edges.extend(edges);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
