//! Session and workflow-template persistence.
//!
//! Sessions are whole-graph snapshots restored destructively; templates
//! are reusable fragments instantiated additively with fresh ids. Both
//! serialize to plain JSON under fixed keys in a [`KeyValueStore`]
//! collaborator. Writes are whole-object and best-effort: a failed write
//! surfaces as a [`PersistenceError`] and never corrupts the in-memory
//! graph.

mod defaults;
mod store;

pub use defaults::default_templates;
pub use store::{KeyValueStore, MemoryStore};

use crate::error::PersistenceError;
use crate::graph::{Edge, GraphStore, Node, fresh_edge_id, fresh_node_id};
use crate::interact::CanvasController;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

/// Storage key for the session history list.
pub const SESSIONS_KEY: &str = "canvas_history";
/// Storage key for the workflow template library.
pub const LIBRARY_KEY: &str = "canvas_library";

/// A named, persisted snapshot of an entire graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub timestamp: u64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A graph fragment carried by a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFragment {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A persisted, reusable graph fragment meant to be instantiated (copied
/// with fresh ids) rather than loaded destructively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: GraphFragment,
    pub timestamp: u64,
    #[serde(default)]
    pub is_default: bool,
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Session history and template library layered over a [`KeyValueStore`].
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The saved session list, newest first. A missing key is an empty
    /// list; corrupt stored JSON is an error.
    pub fn sessions(&self) -> Result<Vec<Session>, PersistenceError> {
        match self.store.get(SESSIONS_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Snapshots the live graph by value and prepends it to the session
    /// list. Later graph mutation does not retroactively alter the saved
    /// session.
    pub fn save_session(
        &mut self,
        name: &str,
        graph: &GraphStore,
    ) -> Result<Session, PersistenceError> {
        let session = Session {
            id: format!("session-{}", Uuid::new_v4()),
            name: name.to_string(),
            timestamp: now_millis(),
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
        };
        let mut sessions = self.sessions()?;
        sessions.insert(0, session.clone());
        self.write(SESSIONS_KEY, &sessions)?;
        debug!(session = %session.id, name, "saved session");
        Ok(session)
    }

    pub fn delete_session(&mut self, id: &str) -> Result<(), PersistenceError> {
        let mut sessions = self.sessions()?;
        sessions.retain(|s| s.id != id);
        self.write(SESSIONS_KEY, &sessions)
    }

    /// The template library, newest first. Seeds and persists the default
    /// starter workflows on first read.
    pub fn templates(&mut self) -> Result<Vec<WorkflowTemplate>, PersistenceError> {
        match self.store.get(LIBRARY_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => {
                let seeded = default_templates();
                self.write(LIBRARY_KEY, &seeded)?;
                Ok(seeded)
            }
        }
    }

    /// Saves the live graph as a reusable workflow template.
    pub fn save_template(
        &mut self,
        name: &str,
        description: Option<&str>,
        graph: &GraphStore,
    ) -> Result<WorkflowTemplate, PersistenceError> {
        let template = WorkflowTemplate {
            id: format!("workflow-{}", Uuid::new_v4()),
            name: name.to_string(),
            description: description.map(str::to_string),
            content: GraphFragment {
                nodes: graph.nodes().to_vec(),
                edges: graph.edges().to_vec(),
            },
            timestamp: now_millis(),
            is_default: false,
        };
        let mut templates = self.templates()?;
        templates.insert(0, template.clone());
        self.write(LIBRARY_KEY, &templates)?;
        debug!(template = %template.id, name, "saved workflow template");
        Ok(template)
    }

    /// Deletes a user template. Seeded default templates are kept.
    pub fn delete_template(&mut self, id: &str) -> Result<(), PersistenceError> {
        let mut templates = self.templates()?;
        templates.retain(|t| t.id != id || t.is_default);
        self.write(LIBRARY_KEY, &templates)
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_value(value)?;
        self.store.set(key, json)
    }
}

/// Replaces the live graph with a saved session's snapshot and clears the
/// controller's selection and any in-flight gesture.
pub fn load_session(session: &Session, graph: &mut GraphStore, controller: &mut CanvasController) {
    graph.replace(session.nodes.clone(), session.edges.clone());
    controller.reset();
}

/// Copies a template into the live graph with fresh ids for every node and
/// edge, rewriting edge endpoints through the remap table built while
/// copying nodes. Additive: the existing graph is untouched, and
/// instantiating the same template twice never collides ids. Edges whose
/// endpoints are missing from the fragment are dropped rather than left
/// dangling. Returns the ids of the created nodes.
pub fn instantiate_template(template: &WorkflowTemplate, graph: &mut GraphStore) -> Vec<String> {
    let mut id_map: AHashMap<String, String> = AHashMap::new();
    let nodes: Vec<Node> = template
        .content
        .nodes
        .iter()
        .map(|node| {
            let mut copy = node.clone();
            copy.id = fresh_node_id();
            copy.data.is_processing = false;
            id_map.insert(node.id.clone(), copy.id.clone());
            copy
        })
        .collect();
    let edges: Vec<Edge> = template
        .content
        .edges
        .iter()
        .filter_map(|edge| {
            let source = id_map.get(&edge.source)?;
            let target = id_map.get(&edge.target)?;
            Some(Edge {
                id: fresh_edge_id(),
                source: source.clone(),
                source_handle: edge.source_handle.clone(),
                target: target.clone(),
                target_handle: edge.target_handle.clone(),
            })
        })
        .collect();

    let created: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    graph.extend(nodes, edges);
    debug!(template = %template.id, count = created.len(), "instantiated template");
    created
}
