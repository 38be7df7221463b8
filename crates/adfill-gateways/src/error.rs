//! Error types for the collaborator ports
//!
//! Each port surfaces failures through the shared [`GatewayError`] so the
//! runner can propagate any collaborator failure with `?` and classify it
//! uniformly.

/// Failures surfaced by collaborator ports
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Ads platform call failed
    #[error("ads gateway failed: {0}")]
    Ads(String),

    /// Image generation call failed
    #[error("image generation failed: {0}")]
    ImageGen(String),

    /// Text generation (prompt expansion) call failed
    #[error("text generation failed: {0}")]
    TextGen(String),

    /// Creative storage call failed
    #[error("creative storage failed: {0}")]
    Storage(String),

    /// Durable key-value state call failed
    #[error("state store failed: {0}")]
    State(String),

    /// Scheduler call failed
    #[error("scheduler failed: {0}")]
    Schedule(String),

    /// Image payload was not valid base64
    #[error("image payload decode failed: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl GatewayError {
    /// Check whether retrying the same call could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Ads(_)
                | Self::ImageGen(_)
                | Self::TextGen(_)
                | Self::Storage(_)
                | Self::State(_)
                | Self::Schedule(_)
        )
    }
}
