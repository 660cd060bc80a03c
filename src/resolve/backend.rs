use crate::error::BackendError;
use crate::graph::{ImagePayload, StructuredPrompt};
use async_trait::async_trait;

/// The result of analyzing an image: a full descriptive prompt plus its
/// structured breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub text: String,
    pub structured: StructuredPrompt,
}

/// The external generative backend the resolver invokes.
///
/// Implementations may be a network call, a local model or a test stub;
/// the engine only requires the operations to be asynchronous, to reject
/// with a message-bearing [`BackendError`] on failure, and to be safe to
/// call concurrently. Cancellation and timeouts are the implementation's
/// concern.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Produces an image from a prompt, optionally conditioned on a
    /// reference image, at the requested aspect ratio.
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<&ImagePayload>,
        aspect_ratio: &str,
    ) -> Result<ImagePayload, BackendError>;

    /// Describes an image as a reusable prompt.
    async fn analyze(&self, image: &ImagePayload) -> Result<Analysis, BackendError>;

    /// Rewrites an image according to a prompt, optionally constrained to
    /// a masked region.
    async fn edit(
        &self,
        prompt: &str,
        image: &ImagePayload,
        mask: Option<&ImagePayload>,
    ) -> Result<ImagePayload, BackendError>;
}
