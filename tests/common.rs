//! Common test utilities: a call-counting stub backend and graph builders.
use async_trait::async_trait;
use kairo::prelude::*;
use std::result::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A scripted [`ExecutionBackend`] that counts calls and returns fixed
/// payloads, or fails every call with a fixed message.
#[allow(dead_code)]
pub struct StubBackend {
    pub generate_calls: AtomicUsize,
    pub analyze_calls: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub fail_with: Option<String>,
    pub image: ImagePayload,
    pub analysis: Analysis,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            generate_calls: AtomicUsize::new(0),
            analyze_calls: AtomicUsize::new(0),
            edit_calls: AtomicUsize::new(0),
            fail_with: None,
            image: ImagePayload::new("stub-image-payload"),
            analysis: Analysis {
                text: "A tabby cat on a windowsill".to_string(),
                structured: StructuredPrompt {
                    subject: "tabby cat".to_string(),
                    background: "windowsill".to_string(),
                    ..StructuredPrompt::default()
                },
            },
        }
    }
}

impl StubBackend {
    #[allow(dead_code)]
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    #[allow(dead_code)]
    pub fn total_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
            + self.analyze_calls.load(Ordering::SeqCst)
            + self.edit_calls.load(Ordering::SeqCst)
    }

    fn outcome<T: Clone>(&self, ok: &T) -> Result<T, BackendError> {
        match &self.fail_with {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(ok.clone()),
        }
    }
}

#[async_trait]
impl ExecutionBackend for StubBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _reference: Option<&ImagePayload>,
        _aspect_ratio: &str,
    ) -> Result<ImagePayload, BackendError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome(&self.image)
    }

    async fn analyze(&self, _image: &ImagePayload) -> Result<Analysis, BackendError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome(&self.analysis)
    }

    async fn edit(
        &self,
        _prompt: &str,
        _image: &ImagePayload,
        _mask: Option<&ImagePayload>,
    ) -> Result<ImagePayload, BackendError> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome(&self.image)
    }
}

/// Builds a text node feeding a generator's prompt input. Returns the
/// graph plus `(text_id, generator_id)`.
#[allow(dead_code)]
pub fn text_to_generator_graph() -> (GraphStore, String, String) {
    let mut graph = GraphStore::new();
    let text = graph.add_node(NodeType::TextInput, Point::new(0.0, 0.0));
    graph.update_node_data(&text, |data| data.value = Some("A cat".to_string()));
    let generator = graph.add_node(NodeType::Generator, Point::new(400.0, 0.0));
    graph.add_edge(&text, "text", &generator, "prompt");
    (graph, text, generator)
}

/// An image payload distinct from the stub backend's output.
#[allow(dead_code)]
pub fn uploaded_image() -> ImagePayload {
    ImagePayload::new("uploaded-image-payload")
}
