//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kairo crate. Import
//! this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! let mut graph = GraphStore::new();
//! let text = graph.add_node(NodeType::TextInput, Point::new(0.0, 0.0));
//! let generator = graph.add_node(NodeType::Generator, Point::new(400.0, 0.0));
//! graph.add_edge(&text, "text", &generator, "prompt");
//! assert_eq!(graph.edges().len(), 1);
//! ```

// Graph store and data model
pub use crate::graph::{
    DataKind, Edge, GraphStore, ImagePayload, Node, NodeData, NodeSpec, NodeType, Point, Port,
    PortDirection, PromptTab, StructuredPrompt, node_spec,
};

// Geometry
pub use crate::layout::{Viewport, node_height, node_width, port_anchor};

// Interaction
pub use crate::interact::{CanvasController, InteractionState, PointerTarget};

// Execution
pub use crate::resolve::{Analysis, ExecutionBackend, Resolver};

// Persistence
pub use crate::persist::{
    KeyValueStore, MemoryStore, Persistence, Session, WorkflowTemplate, instantiate_template,
    load_session,
};

// Error types
pub use crate::error::{BackendError, PersistenceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
