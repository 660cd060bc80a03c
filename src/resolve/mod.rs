//! Resolution: gathering a node's upstream values and running it.
//!
//! For the node being run, each declared input port is resolved by walking
//! the incoming edge (if any) to the source node's current data: text ports
//! read the source's `value`, image ports its `image_data`. Validation
//! failures are written into the node's `error` field without invoking the
//! backend; backend rejections are caught at this boundary and their
//! message recorded the same way. One node's failure never touches sibling
//! nodes.
//!
//! The resolver imposes no per-node mutual exclusion: re-running a node
//! whose previous call has not resolved simply starts a second call, and
//! callers that want debouncing do it in the UI layer.

mod backend;

pub use backend::{Analysis, ExecutionBackend};

use crate::error::BackendError;
use crate::graph::{GraphStore, NodeData, NodeType, Point, PromptTab, StructuredPrompt, node_spec};
use tracing::{debug, warn};

/// Horizontal gap between an analyze node and the text node auto-wiring
/// creates for it.
const AUTOWIRE_GAP: f64 = 50.0;

/// Runs nodes against an [`ExecutionBackend`], writing results and errors
/// back into the [`GraphStore`].
pub struct Resolver<B> {
    backend: B,
}

impl<B: ExecutionBackend> Resolver<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a single node. Pure with respect to topology: only the node's
    /// own data bag is written. Nodes without a run action (text and image
    /// inputs) and unknown ids are no-ops. Re-running from either terminal
    /// state is permitted.
    pub async fn run(&self, store: &mut GraphStore, node_id: &str) {
        let Some(node) = store.node(node_id) else {
            return;
        };
        match node.node_type {
            NodeType::Generator => self.run_generator(store, node_id).await,
            NodeType::AnalyzeImage => self.run_analyze(store, node_id).await,
            NodeType::ImageEdit => self.run_edit(store, node_id).await,
            NodeType::TextInput | NodeType::ImageInput => {}
        }
    }

    /// [`run`](Self::run) layered with the analyze node's auto-wiring side
    /// effect: on success the analysis is pushed into the text node already
    /// wired to this node's `text` output, or a fresh text node is created
    /// and wired up. The one place execution mutates topology.
    pub async fn run_analyze_and_autowire(&self, store: &mut GraphStore, node_id: &str) {
        self.run(store, node_id).await;
        let Some(node) = store.node(node_id) else {
            return;
        };
        if node.node_type != NodeType::AnalyzeImage || node.data.error.is_some() {
            return;
        }
        let Some(text) = node.data.value.clone() else {
            return;
        };
        let structured = node.data.json_value.clone();
        autowire_analysis(store, node_id, text, structured);
    }

    async fn run_generator(&self, store: &mut GraphStore, node_id: &str) {
        let prompt = store
            .incoming_edge(node_id, "prompt")
            .and_then(|e| store.node(&e.source))
            .and_then(|source| source.data.value.clone())
            .unwrap_or_default();
        let reference = store
            .incoming_edge(node_id, "refImage")
            .and_then(|e| store.node(&e.source))
            .and_then(|source| source.data.image_data.clone());

        if prompt.is_empty() && reference.is_none() {
            fail_validation(store, node_id, "Connect a text prompt or image source.");
            return;
        }

        let aspect_ratio = store
            .node(node_id)
            .and_then(|n| n.data.aspect_ratio.clone())
            .unwrap_or_else(|| "1:1".to_string());

        debug!(node = node_id, "running generator");
        begin_processing(store, node_id);
        match self
            .backend
            .generate(&prompt, reference.as_ref(), &aspect_ratio)
            .await
        {
            Ok(image) => store.update_node_data(node_id, |data| {
                data.is_processing = false;
                data.image_data = Some(image);
            }),
            Err(err) => fail_backend(store, node_id, err),
        }
    }

    async fn run_analyze(&self, store: &mut GraphStore, node_id: &str) {
        let Some(image) = store
            .node(node_id)
            .and_then(|n| n.data.image_data.clone())
        else {
            fail_validation(store, node_id, "Upload an image first.");
            return;
        };

        debug!(node = node_id, "running analysis");
        begin_processing(store, node_id);
        match self.backend.analyze(&image).await {
            Ok(analysis) => store.update_node_data(node_id, |data| {
                data.is_processing = false;
                data.value = Some(analysis.text);
                data.json_value = Some(analysis.structured);
            }),
            Err(err) => fail_backend(store, node_id, err),
        }
    }

    async fn run_edit(&self, store: &mut GraphStore, node_id: &str) {
        // The node's own upload is the fallback; a connected image source
        // overrides it.
        let mut image = store
            .node(node_id)
            .and_then(|n| n.data.image_data.clone());
        if let Some(upstream) = store
            .incoming_edge(node_id, "image")
            .and_then(|e| store.node(&e.source))
            .and_then(|source| source.data.image_data.clone())
        {
            image = Some(upstream);
        }
        let prompt = store
            .incoming_edge(node_id, "prompt")
            .and_then(|e| store.node(&e.source))
            .and_then(|source| source.data.value.clone())
            .unwrap_or_default();

        let Some(image) = image else {
            fail_validation(store, node_id, "No image source found.");
            return;
        };
        if prompt.is_empty() {
            fail_validation(store, node_id, "Please connect a text prompt.");
            return;
        }

        let mask = store.node(node_id).and_then(|n| n.data.mask_data.clone());

        debug!(node = node_id, "running image edit");
        begin_processing(store, node_id);
        match self.backend.edit(&prompt, &image, mask.as_ref()).await {
            Ok(result) => store.update_node_data(node_id, |data| {
                data.is_processing = false;
                data.image_data = Some(result);
                data.mask_data = None;
            }),
            Err(err) => fail_backend(store, node_id, err),
        }
    }
}

/// Pushes an analysis result downstream of an analyze node's `text`
/// output. Overwrites the already-connected text node in place when one
/// exists; otherwise creates a fresh text node beside the analyzer and
/// wires it up. All store invariants hold afterwards because the mutation
/// goes through the ordinary store operations.
fn autowire_analysis(
    store: &mut GraphStore,
    node_id: &str,
    text: String,
    structured: Option<StructuredPrompt>,
) {
    if let Some(edge) = store.outgoing_edge(node_id, "text") {
        let target_id = edge.target.clone();
        let is_text_node = store
            .node(&target_id)
            .is_some_and(|n| n.node_type == NodeType::TextInput);
        if is_text_node {
            store.update_node_data(&target_id, |data| {
                data.value = Some(text);
                data.json_value = structured;
                data.active_tab = Some(PromptTab::Json);
            });
        }
        return;
    }

    let Some(node) = store.node(node_id) else {
        return;
    };
    let position = Point::new(
        node.position.x + node_spec(NodeType::AnalyzeImage).width + AUTOWIRE_GAP,
        node.position.y,
    );
    let data = NodeData {
        label: "Analyzed Prompt".to_string(),
        value: Some(text),
        json_value: structured,
        active_tab: Some(PromptTab::Json),
        ..NodeData::default()
    };
    let new_id = store.add_node_with_data(NodeType::TextInput, position, data);
    store.add_edge(node_id, "text", &new_id, "input");
    debug!(node = node_id, created = %new_id, "auto-wired analysis result");
}

fn begin_processing(store: &mut GraphStore, node_id: &str) {
    store.update_node_data(node_id, |data| {
        data.is_processing = true;
        data.error = None;
    });
}

fn fail_validation(store: &mut GraphStore, node_id: &str, message: &str) {
    store.update_node_data(node_id, |data| {
        data.is_processing = false;
        data.error = Some(message.to_string());
    });
}

fn fail_backend(store: &mut GraphStore, node_id: &str, err: BackendError) {
    warn!(node = node_id, error = %err, "backend call failed");
    store.update_node_data(node_id, |data| {
        data.is_processing = false;
        data.error = Some(err.to_string());
    });
}
