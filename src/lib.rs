//! # Kairo - Node-Canvas Graph Engine
//!
//! **Kairo** is the graph-editing and execution-resolution engine behind a
//! node-based creative canvas: typed nodes (text prompts, image sources,
//! analyzers, generators, editors) connected by wires, edited through a
//! pointer-driven state machine, and run one node at a time by resolving
//! upstream values along incoming edges.
//!
//! ## Core Workflow
//!
//! The engine is UI-agnostic. The consumer owns rendering and hit-testing;
//! Kairo owns the data and the rules:
//!
//! 1.  **Edit**: mutate a [`graph::GraphStore`] directly (toolbar actions)
//!     or drive an [`interact::CanvasController`] with pointer events
//!     (pan, drag, wire). The store keeps the structural invariants after
//!     every call: no dangling edges, one incoming edge per target handle,
//!     no self-loops.
//! 2.  **Layout**: derive wire endpoints with [`layout::port_anchor`],
//!     which shares its content-aware height model with node rendering so
//!     wires never detach from node bodies.
//! 3.  **Run**: hand a [`resolve::Resolver`] an implementation of the
//!     [`resolve::ExecutionBackend`] collaborator trait and ask it to run
//!     a node; it gathers upstream values, validates, and writes the
//!     result or error back into the node's data.
//! 4.  **Persist**: snapshot whole sessions and reusable workflow
//!     templates through [`persist::Persistence`] over any
//!     [`persist::KeyValueStore`].
//!
//! ## Quick Start
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut graph = GraphStore::new();
//!     let mut controller = CanvasController::new();
//!
//!     // Build a two-node pipeline.
//!     let text = graph.add_node(NodeType::TextInput, Point::new(100.0, 100.0));
//!     graph.update_node_data(&text, |data| data.value = Some("A cat".to_string()));
//!     let generator = graph.add_node(NodeType::Generator, Point::new(500.0, 100.0));
//!
//!     // Wire them with a pointer gesture: press on the text node's
//!     // output port, release on the generator's prompt input.
//!     controller.pointer_down(
//!         PointerTarget::Port {
//!             node: text.clone(),
//!             port: "text".to_string(),
//!             direction: PortDirection::Source,
//!         },
//!         Point::new(420.0, 310.0),
//!         &graph,
//!     );
//!     let edge = controller.pointer_up(
//!         PointerTarget::Port {
//!             node: generator.clone(),
//!             port: "prompt".to_string(),
//!             direction: PortDirection::Target,
//!         },
//!         &mut graph,
//!     );
//!     assert!(edge.is_some());
//!
//!     // Snapshot the canvas and restore it later.
//!     let mut persistence = Persistence::new(MemoryStore::new());
//!     let session = persistence.save_session("Cat pipeline", &graph)?;
//!     load_session(&session, &mut graph, &mut controller);
//!     Ok(())
//! }
//! ```
//!
//! Running the generator additionally needs an [`resolve::ExecutionBackend`]
//! implementation (a network client, a local model, or a stub in tests)
//! and an async runtime to await the call.

pub mod error;
pub mod graph;
pub mod interact;
pub mod layout;
pub mod persist;
pub mod prelude;
pub mod resolve;
