//! Runner configuration
//!
//! All knobs for one deployment of the runner: the per-group creative quota,
//! the prompt construction mode, storage subfolder names, and the watchdog
//! budget. Loadable from TOML or built programmatically; everything that can
//! be rejected (an unknown prompt mode, a regex that does not compile) is
//! rejected at load time, never inside the item loop.

use crate::error::ConfigError;
use crate::prompt::PromptBuilder;
use serde::{Deserialize, Serialize};

/// Default watchdog ceiling: 5 minutes, safely under the platform's
/// 6-minute hard execution limit.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 5 * 60 * 1_000;

/// Default retry cap for empty generation batches per ad group.
pub const DEFAULT_MAX_EMPTY_BATCHES: u32 = 3;

/// Prompt construction mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PromptConfig {
    /// Derive the prompt from the ad group's display name
    AdGroup {
        /// Regular expression with named capture groups applied to the name
        name_pattern: String,
        /// Template with `${capture}` placeholders
        template: String,
        /// Prompt used when the name does not match the pattern
        default_prompt: String,
    },
    /// Derive the prompt from the ad group's keywords via text generation
    Keywords {
        /// Context line prepended to the expansion request
        context: String,
        /// Text placed immediately before the keyword blob
        prefix: String,
        /// Text placed immediately after the keyword blob
        suffix: String,
    },
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self::AdGroup {
            name_pattern: r"^(?P<product>.+?)\s*-\s*(?P<theme>.+)$".to_string(),
            template: "A high quality advertising photo of ${product}, ${theme}".to_string(),
            default_prompt: "A high quality advertising product photo".to_string(),
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Creative quota per ad group
    pub target_per_group: usize,
    /// Prompt construction mode
    pub prompt: PromptConfig,
    /// Optional suffix appended to every final prompt
    pub prompt_suffix: Option<String>,
    /// Storage subfolders counted toward the quota
    pub subfolders: Vec<String>,
    /// Subfolder newly generated creatives are uploaded into
    pub generated_subfolder: String,
    /// Watchdog ceiling in milliseconds
    pub time_budget_ms: u64,
    /// Empty-batch retry cap per ad group
    pub max_empty_batches: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            target_per_group: 4,
            prompt: PromptConfig::default(),
            prompt_suffix: None,
            subfolders: vec!["generated".to_string(), "approved".to_string()],
            generated_subfolder: "generated".to_string(),
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            max_empty_batches: DEFAULT_MAX_EMPTY_BATCHES,
        }
    }
}

impl RunnerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With per-group quota
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target: usize) -> Self {
        self.target_per_group = target;
        self
    }

    /// With prompt mode
    #[inline]
    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptConfig) -> Self {
        self.prompt = prompt;
        self
    }

    /// With prompt suffix
    #[inline]
    #[must_use]
    pub fn with_prompt_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.prompt_suffix = Some(suffix.into());
        self
    }

    /// With watchdog budget in milliseconds
    #[inline]
    #[must_use]
    pub fn with_time_budget_ms(mut self, budget_ms: u64) -> Self {
        self.time_budget_ms = budget_ms;
        self
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Validate values and compile the prompt mode
    ///
    /// Returns the compiled [`PromptBuilder`] so callers validate and build
    /// in one step; `run()` refuses to start on an invalid configuration.
    pub fn validate(&self) -> Result<PromptBuilder, ConfigError> {
        if self.target_per_group == 0 {
            return Err(ConfigError::Invalid(
                "target_per_group must be at least 1".to_string(),
            ));
        }
        if self.time_budget_ms == 0 {
            return Err(ConfigError::Invalid(
                "time_budget_ms must be nonzero".to_string(),
            ));
        }
        if self.generated_subfolder.is_empty() {
            return Err(ConfigError::Invalid(
                "generated_subfolder must not be empty".to_string(),
            ));
        }
        if self.subfolders.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one quota subfolder is required".to_string(),
            ));
        }
        PromptBuilder::compile(&self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_round_trip_ad_group_mode() {
        let raw = r#"
            target_per_group = 2
            subfolders = ["generated"]
            generated_subfolder = "generated"

            [prompt]
            mode = "ad_group"
            name_pattern = "^(?P<city>.+) Tours$"
            template = "A photo of a ${city}"
            default_prompt = "A travel photo"
        "#;

        let config = RunnerConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.target_per_group, 2);
        assert!(matches!(config.prompt, PromptConfig::AdGroup { .. }));
        // Unspecified fields fall back to defaults
        assert_eq!(config.time_budget_ms, DEFAULT_TIME_BUDGET_MS);
    }

    #[test]
    fn toml_keywords_mode() {
        let raw = r#"
            [prompt]
            mode = "keywords"
            context = "You write image prompts."
            prefix = "Themes: "
            suffix = "."
        "#;

        let config = RunnerConfig::from_toml_str(raw).unwrap();
        assert!(matches!(config.prompt, PromptConfig::Keywords { .. }));
    }

    #[test]
    fn unknown_mode_is_rejected_at_load() {
        let raw = r#"
            [prompt]
            mode = "haiku"
        "#;

        assert!(matches!(
            RunnerConfig::from_toml_str(raw),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_regex_is_rejected_at_load() {
        let raw = r#"
            [prompt]
            mode = "ad_group"
            name_pattern = "(unclosed"
            template = "t"
            default_prompt = "d"
        "#;

        assert!(matches!(
            RunnerConfig::from_toml_str(raw),
            Err(ConfigError::InvalidNamePattern(_))
        ));
    }

    #[test]
    fn zero_target_is_rejected() {
        let config = RunnerConfig::default().with_target(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
