//! Tests for session history, the template library and instantiation.
mod common;

use kairo::persist::{LIBRARY_KEY, SESSIONS_KEY};
use kairo::prelude::*;
use std::result::Result;

/// A store whose writes always fail, for surfacing save errors.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        Ok(None)
    }
    fn set(&mut self, _key: &str, _value: serde_json::Value) -> Result<(), PersistenceError> {
        Err(PersistenceError::Store("disk full".to_string()))
    }
}

#[test]
fn test_sessions_start_empty() {
    let persistence = Persistence::new(MemoryStore::new());
    assert!(persistence.sessions().unwrap().is_empty());
}

#[test]
fn test_saved_sessions_are_deep_snapshots() {
    let (mut graph, text, _generator) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());

    let session = persistence.save_session("S1", &graph).unwrap();
    assert_eq!(session.nodes.len(), 2);
    assert_eq!(session.edges.len(), 1);

    // Mutating the live graph must not retroactively alter the snapshot.
    graph.update_node_data(&text, |data| data.value = Some("changed".to_string()));
    graph.add_node(NodeType::ImageInput, Point::new(0.0, 500.0));

    let stored = persistence.sessions().unwrap();
    assert_eq!(stored[0], session);
    assert_eq!(stored[0].nodes.len(), 2);
    assert_eq!(
        stored[0]
            .nodes
            .iter()
            .find(|n| n.id == text)
            .unwrap()
            .data
            .value
            .as_deref(),
        Some("A cat")
    );
}

#[test]
fn test_sessions_prepend_newest_first() {
    let (graph, _, _) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());
    persistence.save_session("first", &graph).unwrap();
    persistence.save_session("second", &graph).unwrap();

    let names: Vec<_> = persistence
        .sessions()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["second", "first"]);
}

#[test]
fn test_load_session_replaces_the_graph_and_resets_the_controller() {
    let (mut graph, _text, _generator) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());
    let session = persistence.save_session("S1", &graph).unwrap();

    // Diverge: a third unrelated node, a selection and a pan in flight.
    let extra = graph.add_node(NodeType::ImageInput, Point::new(0.0, 500.0));
    let mut controller = CanvasController::new();
    controller.pointer_down(
        PointerTarget::NodeBody(extra.clone()),
        Point::new(0.0, 500.0),
        &graph,
    );

    load_session(&session, &mut graph, &mut controller);

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.edges().len(), 1);
    assert!(graph.node(&extra).is_none());
    assert_eq!(graph.nodes(), &session.nodes[..]);
    assert_eq!(graph.edges(), &session.edges[..]);
    assert_eq!(*controller.state(), InteractionState::Idle);
    assert_eq!(controller.selected(), None);
}

#[test]
fn test_delete_session_removes_it() {
    let (graph, _, _) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());
    let session = persistence.save_session("S1", &graph).unwrap();
    persistence.delete_session(&session.id).unwrap();
    assert!(persistence.sessions().unwrap().is_empty());
}

#[test]
fn test_failed_save_surfaces_an_error() {
    let (graph, _, _) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(BrokenStore);
    let result = persistence.save_session("S1", &graph);
    assert!(matches!(result, Err(PersistenceError::Store(_))));
}

#[test]
fn test_corrupt_stored_sessions_surface_a_decode_error() {
    let mut store = MemoryStore::new();
    store
        .set(SESSIONS_KEY, serde_json::json!({"not": "a list"}))
        .unwrap();
    let persistence = Persistence::new(store);
    assert!(matches!(
        persistence.sessions(),
        Err(PersistenceError::Decode(_))
    ));
}

#[test]
fn test_template_library_seeds_defaults_once() {
    let mut persistence = Persistence::new(MemoryStore::new());
    let templates = persistence.templates().unwrap();
    assert_eq!(templates.len(), 2);
    assert!(templates.iter().all(|t| t.is_default));
    assert_eq!(templates[0].name, "Simple Text-to-Image");

    // The seed is persisted, not regenerated per read.
    let store = persistence.into_store();
    assert!(store.get(LIBRARY_KEY).unwrap().is_some());
}

#[test]
fn test_default_templates_are_not_deletable() {
    let mut persistence = Persistence::new(MemoryStore::new());
    let templates = persistence.templates().unwrap();
    persistence.delete_template(&templates[0].id).unwrap();
    assert_eq!(persistence.templates().unwrap().len(), 2);
}

#[test]
fn test_user_templates_save_and_delete() {
    let (graph, _, _) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());
    let saved = persistence
        .save_template("Cat pipeline", Some("text to image"), &graph)
        .unwrap();
    assert!(!saved.is_default);
    assert_eq!(persistence.templates().unwrap().len(), 3);

    persistence.delete_template(&saved.id).unwrap();
    assert_eq!(persistence.templates().unwrap().len(), 2);
}

#[test]
fn test_instantiation_remaps_every_id() {
    let (graph, _, _) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());
    let template = persistence
        .save_template("Cat pipeline", None, &graph)
        .unwrap();

    let mut live = GraphStore::new();
    let created = instantiate_template(&template, &mut live);

    assert_eq!(created.len(), 2);
    assert_eq!(live.nodes().len(), 2);
    assert_eq!(live.edges().len(), 1);
    // No id survives from the template fragment.
    for node in live.nodes() {
        assert!(template.content.nodes.iter().all(|n| n.id != node.id));
    }
    let edge = &live.edges()[0];
    assert!(template.content.edges.iter().all(|e| e.id != edge.id));
    // Endpoints were rewritten onto the fresh nodes.
    assert!(live.node(&edge.source).is_some());
    assert!(live.node(&edge.target).is_some());
    assert_eq!(edge.target_handle, "prompt");
}

#[test]
fn test_instantiating_twice_never_collides() {
    let mut persistence = Persistence::new(MemoryStore::new());
    let template = persistence.templates().unwrap()[0].clone();

    let mut live = GraphStore::new();
    let first = instantiate_template(&template, &mut live);
    let second = instantiate_template(&template, &mut live);

    assert_eq!(live.nodes().len(), 4);
    assert_eq!(live.edges().len(), 2);
    assert!(first.iter().all(|id| !second.contains(id)));

    // Mutating one instance leaves the other untouched.
    live.update_node_data(&first[0], |data| data.value = Some("mutated".to_string()));
    assert_ne!(
        live.node(&second[0]).unwrap().data.value.as_deref(),
        Some("mutated")
    );
}

#[test]
fn test_instantiation_clears_transient_run_state() {
    let mut graph = GraphStore::new();
    let generator = graph.add_node(NodeType::Generator, Point::new(0.0, 0.0));
    graph.update_node_data(&generator, |data| data.is_processing = true);
    let mut persistence = Persistence::new(MemoryStore::new());
    let template = persistence.save_template("Mid-run", None, &graph).unwrap();

    let mut live = GraphStore::new();
    let created = instantiate_template(&template, &mut live);
    assert!(!live.node(&created[0]).unwrap().data.is_processing);
}

#[test]
fn test_session_json_round_trips_in_the_original_wire_format() {
    let (graph, _, _) = common::text_to_generator_graph();
    let mut persistence = Persistence::new(MemoryStore::new());
    let session = persistence.save_session("S1", &graph).unwrap();

    let json = serde_json::to_value(&session).unwrap();
    // camelCase keys on the wire, matching the persisted app format.
    let node = &json["nodes"][0];
    assert_eq!(node["type"], "TEXT_INPUT");
    assert!(node["data"].get("isProcessing").is_some());
    let edge = &json["edges"][0];
    assert!(edge.get("sourceHandle").is_some());
    assert!(edge.get("targetHandle").is_some());

    let back: Session = serde_json::from_value(json).unwrap();
    assert_eq!(back, session);
}
