//! Prompt construction
//!
//! Two ways to produce a generation prompt for an ad group, selected once at
//! configuration-load time:
//! - **AdGroup**: parse the display name with a named-capture regex and
//!   substitute the captures into a template, falling back to a default
//!   prompt when the name does not match.
//! - **Keywords**: deduplicate the group's keyword texts into a blob and
//!   expand it through the text-generation call.

use crate::config::PromptConfig;
use crate::error::{ConfigError, RunnerError};
use adfill_gateways::{AdGroup, AdsGateway, ImageGateway};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;

/// Replace `${name}` placeholders in a template
///
/// Each mapping entry is applied once, in mapping iteration order. Single
/// pass: a value containing another placeholder's token is handled in
/// whatever order the mapping yields, and placeholders with no mapping entry
/// are left verbatim.
#[must_use]
pub fn substitute_placeholders(template: &str, values: &IndexMap<String, String>) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("${{{name}}}"), value);
    }
    out
}

/// Deduplicate keyword texts preserving first-occurrence order
#[must_use]
pub fn dedup_keyword_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let set: IndexSet<&str> = texts.into_iter().collect();
    set.into_iter().map(str::to_string).collect()
}

/// Compiled prompt mode
///
/// One variant per configuration mode; compiled by
/// [`RunnerConfig::validate`](crate::config::RunnerConfig::validate) so the
/// item loop never dispatches on raw configuration.
#[derive(Debug, Clone)]
pub enum PromptBuilder {
    /// Name-derived prompts
    AdGroup {
        /// Compiled name pattern with named captures
        pattern: Regex,
        /// Template with `${capture}` placeholders
        template: String,
        /// Fallback for non-matching names
        default_prompt: String,
    },
    /// Keyword-derived prompts
    Keywords {
        /// Context line for the expansion request
        context: String,
        /// Text before the keyword blob
        prefix: String,
        /// Text after the keyword blob
        suffix: String,
    },
}

impl PromptBuilder {
    /// Compile a prompt configuration
    ///
    /// # Errors
    /// `ConfigError::InvalidNamePattern` if the regex does not compile.
    pub fn compile(config: &PromptConfig) -> Result<Self, ConfigError> {
        match config {
            PromptConfig::AdGroup {
                name_pattern,
                template,
                default_prompt,
            } => Ok(Self::AdGroup {
                pattern: Regex::new(name_pattern)?,
                template: template.clone(),
                default_prompt: default_prompt.clone(),
            }),
            PromptConfig::Keywords {
                context,
                prefix,
                suffix,
            } => Ok(Self::Keywords {
                context: context.clone(),
                prefix: prefix.clone(),
                suffix: suffix.clone(),
            }),
        }
    }

    /// Build the generation prompt for one ad group
    ///
    /// Returns `Ok(None)` when the group yields nothing to prompt from (a
    /// keywords-mode group with no keywords) — the caller abandons the group
    /// without generating images.
    pub async fn build(
        &self,
        group: &AdGroup,
        ads: &dyn AdsGateway,
        images: &dyn ImageGateway,
    ) -> Result<Option<String>, RunnerError> {
        match self {
            Self::AdGroup {
                pattern,
                template,
                default_prompt,
            } => Ok(Some(name_prompt(group, pattern, template, default_prompt))),
            Self::Keywords {
                context,
                prefix,
                suffix,
            } => {
                let keywords = ads.list_keywords(&group.id).await?;
                let texts = dedup_keyword_texts(keywords.iter().map(|k| k.text.as_str()));
                if texts.is_empty() {
                    tracing::warn!(ad_group = %group.id, "no keywords, skipping group");
                    return Ok(None);
                }

                let blob = texts.join(", ");
                let request = format!("{context}\n{prefix}{blob}{suffix}");
                let prompt = images.generate_text(&request).await?;
                Ok(Some(prompt))
            }
        }
    }
}

/// Derive a prompt from the ad group's display name
fn name_prompt(group: &AdGroup, pattern: &Regex, template: &str, default_prompt: &str) -> String {
    let Some(captures) = pattern.captures(&group.name) else {
        tracing::debug!(ad_group = %group.id, "name did not match pattern, using default prompt");
        return default_prompt.to_string();
    };

    let mut values = IndexMap::new();
    for name in pattern.capture_names().flatten() {
        if let Some(m) = captures.name(name) {
            values.insert(name.to_string(), m.as_str().to_string());
        }
    }
    substitute_placeholders(template, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adfill_gateways::{AdGroupId, FixtureAdsGateway, ScriptedImageGateway};

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitution_replaces_placeholder() {
        let out = substitute_placeholders("A photo of a ${city}", &values(&[("city", "London")]));
        assert_eq!(out, "A photo of a London");
    }

    #[test]
    fn substitution_leaves_unmatched_placeholders() {
        let out = substitute_placeholders("A ${size} photo of ${city}", &values(&[("city", "Oslo")]));
        assert_eq!(out, "A ${size} photo of Oslo");
    }

    #[test]
    fn substitution_replaces_every_occurrence() {
        let out = substitute_placeholders("${x} and ${x}", &values(&[("x", "y")]));
        assert_eq!(out, "y and y");
    }

    #[test]
    fn substitution_is_single_pass_in_mapping_order() {
        // The first value introduces the second placeholder's token; with
        // mapping order a-then-b the introduced token gets replaced, and no
        // further pass runs after b.
        let out = substitute_placeholders("${a}", &values(&[("a", "${b}"), ("b", "done")]));
        assert_eq!(out, "done");

        let out = substitute_placeholders("${b}${a}", &values(&[("b", "stop"), ("a", "${b}")]));
        assert_eq!(out, "stop${b}");
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let out = dedup_keyword_texts(["red", "blue", "red", "green", "blue"]);
        assert_eq!(out, vec!["red", "blue", "green"]);
    }

    fn name_mode(pattern: &str, template: &str) -> PromptBuilder {
        PromptBuilder::compile(&PromptConfig::AdGroup {
            name_pattern: pattern.to_string(),
            template: template.to_string(),
            default_prompt: "fallback prompt".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn name_mode_substitutes_captures() {
        let builder = name_mode(
            r"^(?P<product>.+) - (?P<theme>.+)$",
            "A photo of ${product} in ${theme} style",
        );
        let group = AdGroup::new("1", "Running Shoes - Summer", "9");
        let ads = FixtureAdsGateway::new();
        let images = ScriptedImageGateway::new(1);

        let prompt = builder.build(&group, &ads, &images).await.unwrap();
        assert_eq!(
            prompt.as_deref(),
            Some("A photo of Running Shoes in Summer style")
        );
    }

    #[tokio::test]
    async fn name_mode_falls_back_on_no_match() {
        let builder = name_mode(r"^(?P<product>.+) - (?P<theme>.+)$", "unused ${product}");
        let group = AdGroup::new("1", "NoSeparatorHere", "9");
        let ads = FixtureAdsGateway::new();
        let images = ScriptedImageGateway::new(1);

        let prompt = builder.build(&group, &ads, &images).await.unwrap();
        assert_eq!(prompt.as_deref(), Some("fallback prompt"));
    }

    fn keywords_mode() -> PromptBuilder {
        PromptBuilder::compile(&PromptConfig::Keywords {
            context: "You write image prompts.".to_string(),
            prefix: "Themes: ".to_string(),
            suffix: ".".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn keywords_mode_dedups_and_wraps() {
        let builder = keywords_mode();
        let group = AdGroup::new("1", "Shoes", "9");
        let ads = FixtureAdsGateway::new()
            .with_keywords(AdGroupId::new("1"), vec!["red", "blue", "red"]);
        let images = ScriptedImageGateway::new(1);

        let prompt = builder.build(&group, &ads, &images).await.unwrap();
        assert!(prompt.is_some());

        let requests = images.text_prompts();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], "You write image prompts.\nThemes: red, blue.");
        // "red" appears exactly once in the blob
        assert_eq!(requests[0].matches("red").count(), 1);
    }

    #[tokio::test]
    async fn keywords_mode_skips_empty_groups() {
        let builder = keywords_mode();
        let group = AdGroup::new("1", "Shoes", "9");
        let ads = FixtureAdsGateway::new();
        let images = ScriptedImageGateway::new(1);

        let prompt = builder.build(&group, &ads, &images).await.unwrap();
        assert!(prompt.is_none());
        assert_eq!(images.text_call_count(), 0);
    }
}
