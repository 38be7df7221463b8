//! Adfill Core - checkpointed ad-creative batch runner
//!
//! The runner that:
//! - Walks every ad group in the account, in platform order
//! - Tops up each group's generated-creative quota through the
//!   image-generation port
//! - Persists a resume cursor after every group
//! - Interrupts itself cooperatively when the time budget is spent and
//!   schedules a follow-up invocation to resume
//!
//! # Example
//!
//! ```rust,ignore
//! use adfill_core::{BatchResumeRunner, Collaborators, RunnerConfig};
//!
//! # async fn example(ports: Collaborators) -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunnerConfig::new().with_target(4);
//! let runner = BatchResumeRunner::new(config, ports)?;
//!
//! let report = runner.run().await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod naming;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod simulator;
pub mod watchdog;

// Re-exports for convenience
pub use config::{PromptConfig, RunnerConfig, DEFAULT_MAX_EMPTY_BATCHES, DEFAULT_TIME_BUDGET_MS};
pub use error::{ConfigError, RunnerError};
pub use naming::{creative_file_name, MAX_FILE_NAME_LEN};
pub use prompt::{dedup_keyword_texts, substitute_placeholders, PromptBuilder};
pub use report::{RunOutcome, RunReport};
pub use runner::{BatchResumeRunner, Collaborators, RunId, CURSOR_KEY, RUN_STARTED_AT_KEY};
pub use simulator::{run_simulation, SimulationConfig, SimulationReport};
pub use watchdog::Watchdog;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the runner
    pub use crate::{
        BatchResumeRunner, Collaborators, PromptConfig, RunOutcome, RunReport, RunnerConfig,
        RunnerError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
