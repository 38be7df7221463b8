//! Adfill Gateways - collaborator ports for the batch runner
//!
//! Every external system the runner talks to is modeled as an async port
//! trait plus at least one in-memory adapter:
//! - Ads platform (ad groups and keywords)
//! - Image generation (images and prompt-expansion text)
//! - Creative storage (count and upload)
//! - Durable key-value state (cursor and run-start timestamp)
//! - Follow-up scheduler (self-rescheduling trigger)
//! - Clock (wall-clock time, mockable)
//!
//! The in-memory adapters are real implementations, not mocks: the `adfill`
//! simulator binary composes the runner entirely out of them, and the
//! integration tests reuse the same adapters to pin checkpoint/resume
//! semantics without any network.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Port modules
pub mod ads;
pub mod clock;
pub mod error;
pub mod image;
pub mod model;
pub mod schedule;
pub mod state;
pub mod storage;

// Re-exports for convenience
pub use ads::{AdsGateway, FixtureAdsGateway};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::GatewayError;
pub use image::{GeneratedImage, ImageGateway, ScriptedImageGateway};
pub use model::{AdGroup, AdGroupId, CustomerId, Keyword};
pub use schedule::{CountingScheduler, FollowUpScheduler};
pub use state::{InMemoryStateStore, StateStore};
pub use storage::{folder_path, CreativeStore, InMemoryCreativeStore, StoredCreative};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for wiring the runner's collaborators
    pub use crate::{
        AdGroup, AdGroupId, AdsGateway, Clock, CreativeStore, CustomerId, FollowUpScheduler,
        GatewayError, ImageGateway, Keyword, StateStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
