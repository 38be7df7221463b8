//! Image-generation port
//!
//! Produces base64-encoded creative images from a text prompt, plus a
//! secondary text-generation call the keywords prompt mode uses to expand a
//! keyword blob into a full prompt.

use crate::error::GatewayError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use parking_lot::Mutex;

/// One generated image as returned by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64-encoded image payload
    pub data: String,
}

impl GeneratedImage {
    /// Wrap an already-encoded payload
    #[inline]
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// Encode raw bytes into an image payload
    #[inline]
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: BASE64.encode(bytes),
        }
    }

    /// Decode the payload into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, GatewayError> {
        Ok(BASE64.decode(&self.data)?)
    }
}

/// Image- and text-generation API
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Per-call maximum image count the API accepts
    fn batch_limit(&self) -> usize;

    /// Generate up to `count` images for the prompt
    ///
    /// May return fewer images than requested, including none at all; an
    /// empty batch is not an error at this layer.
    async fn generate_images(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<GeneratedImage>, GatewayError>;

    /// Expand a prompt through the text-generation model
    async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Scripted in-memory image adapter
///
/// Deterministic stand-in for the real API: yields a configurable number of
/// images per call (capped at the requested count), optionally returning
/// empty batches for the first N calls to exercise the retry path. Records
/// every prompt it sees so tests can assert on call counts and content.
#[derive(Debug)]
pub struct ScriptedImageGateway {
    batch_limit: usize,
    images_per_call: usize,
    empty_batches_first: usize,
    calls: Mutex<ScriptedCalls>,
}

#[derive(Debug, Default)]
struct ScriptedCalls {
    image_prompts: Vec<String>,
    text_prompts: Vec<String>,
}

impl ScriptedImageGateway {
    /// Create adapter yielding `images_per_call` images per request
    #[inline]
    #[must_use]
    pub fn new(images_per_call: usize) -> Self {
        Self {
            batch_limit: 4,
            images_per_call,
            empty_batches_first: 0,
            calls: Mutex::new(ScriptedCalls::default()),
        }
    }

    /// With a per-call API limit
    #[inline]
    #[must_use]
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit;
        self
    }

    /// With the first `n` image calls returning empty batches
    #[inline]
    #[must_use]
    pub fn with_empty_batches_first(mut self, n: usize) -> Self {
        self.empty_batches_first = n;
        self
    }

    /// Number of image-generation calls made so far
    #[inline]
    #[must_use]
    pub fn image_call_count(&self) -> usize {
        self.calls.lock().image_prompts.len()
    }

    /// Number of text-generation calls made so far
    #[inline]
    #[must_use]
    pub fn text_call_count(&self) -> usize {
        self.calls.lock().text_prompts.len()
    }

    /// Prompts passed to image generation, in call order
    #[inline]
    #[must_use]
    pub fn image_prompts(&self) -> Vec<String> {
        self.calls.lock().image_prompts.clone()
    }

    /// Prompts passed to text generation, in call order
    #[inline]
    #[must_use]
    pub fn text_prompts(&self) -> Vec<String> {
        self.calls.lock().text_prompts.clone()
    }
}

#[async_trait]
impl ImageGateway for ScriptedImageGateway {
    fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    async fn generate_images(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<GeneratedImage>, GatewayError> {
        let call_no = {
            let mut calls = self.calls.lock();
            calls.image_prompts.push(prompt.to_string());
            calls.image_prompts.len()
        };

        if call_no <= self.empty_batches_first {
            return Ok(Vec::new());
        }

        let yielded = self.images_per_call.min(count);
        let images = (0..yielded)
            .map(|i| GeneratedImage::from_bytes(format!("img-{call_no}-{i}").as_bytes()))
            .collect();
        Ok(images)
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        self.calls.lock().text_prompts.push(prompt.to_string());
        Ok(format!("An advertising photograph featuring {prompt}"))
    }
}
