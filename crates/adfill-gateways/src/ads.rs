//! Ads platform port
//!
//! Supplies the ordered ad-group listing the runner iterates, and the
//! keyword texts used by the keywords prompt mode.

use crate::error::GatewayError;
use crate::model::{AdGroup, AdGroupId, Keyword};
use async_trait::async_trait;
use std::collections::HashMap;

/// Read-only view of the ads platform
#[async_trait]
pub trait AdsGateway: Send + Sync {
    /// List every ad group in the account, in platform order
    ///
    /// The ordering is whatever the platform returns; the runner matches its
    /// resume cursor by identifier, not position, so ordering may change
    /// between invocations.
    async fn list_ad_groups(&self) -> Result<Vec<AdGroup>, GatewayError>;

    /// List the keywords attached to one ad group
    async fn list_keywords(&self, ad_group_id: &AdGroupId) -> Result<Vec<Keyword>, GatewayError>;
}

/// In-memory ads adapter backed by fixed fixtures
///
/// Used by the simulator binary and by tests. Returns groups in insertion
/// order; groups without registered keywords yield an empty list.
#[derive(Debug, Default)]
pub struct FixtureAdsGateway {
    groups: Vec<AdGroup>,
    keywords: HashMap<AdGroupId, Vec<Keyword>>,
}

impl FixtureAdsGateway {
    /// Create empty fixture gateway
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an ad group
    #[inline]
    #[must_use]
    pub fn with_group(mut self, group: AdGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// With keywords for an ad group
    #[inline]
    #[must_use]
    pub fn with_keywords(mut self, ad_group_id: AdGroupId, texts: Vec<&str>) -> Self {
        self.keywords
            .insert(ad_group_id, texts.into_iter().map(Keyword::new).collect());
        self
    }

    /// Number of registered groups
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[async_trait]
impl AdsGateway for FixtureAdsGateway {
    async fn list_ad_groups(&self) -> Result<Vec<AdGroup>, GatewayError> {
        Ok(self.groups.clone())
    }

    async fn list_keywords(&self, ad_group_id: &AdGroupId) -> Result<Vec<Keyword>, GatewayError> {
        Ok(self.keywords.get(ad_group_id).cloned().unwrap_or_default())
    }
}
