//! Creative-storage port
//!
//! Stores generated creatives under `customer_id/ad_group_id/subfolder`
//! paths and answers quota queries by counting what already exists. The
//! quota count is always derived from storage, never cached locally.

use crate::error::GatewayError;
use crate::model::{AdGroupId, CustomerId};
use async_trait::async_trait;
use dashmap::DashMap;

/// One stored creative (file name plus decoded bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCreative {
    /// File name the creative was uploaded under
    pub file_name: String,
    /// Decoded image bytes
    pub bytes: Vec<u8>,
}

/// Creative storage for generated images
#[async_trait]
pub trait CreativeStore: Send + Sync {
    /// Count creatives for an ad group across the given subfolders
    async fn count_creatives(
        &self,
        customer_id: &CustomerId,
        ad_group_id: &AdGroupId,
        subfolders: &[String],
    ) -> Result<usize, GatewayError>;

    /// Upload one creative into `folder` (a full `customer/group/subfolder` path)
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<(), GatewayError>;
}

/// Build the canonical folder path for an ad group subfolder
#[inline]
#[must_use]
pub fn folder_path(customer_id: &CustomerId, ad_group_id: &AdGroupId, subfolder: &str) -> String {
    format!("{customer_id}/{ad_group_id}/{subfolder}")
}

/// In-memory creative store keyed by folder path
///
/// Backed by a concurrent map so the simulator and tests can inspect uploads
/// while a run is in flight.
#[derive(Debug, Default)]
pub struct InMemoryCreativeStore {
    folders: DashMap<String, Vec<StoredCreative>>,
}

impl InMemoryCreativeStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a folder with already-existing creatives
    pub fn seed(&self, folder: &str, count: usize) {
        let mut entry = self.folders.entry(folder.to_string()).or_default();
        for i in 0..count {
            entry.push(StoredCreative {
                file_name: format!("seeded-{i}"),
                bytes: Vec::new(),
            });
        }
    }

    /// Creatives currently stored under one folder
    #[inline]
    #[must_use]
    pub fn folder_contents(&self, folder: &str) -> Vec<StoredCreative> {
        self.folders
            .get(folder)
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Total uploads across all folders
    #[inline]
    #[must_use]
    pub fn total_stored(&self) -> usize {
        self.folders.iter().map(|entry| entry.value().len()).sum()
    }
}

#[async_trait]
impl CreativeStore for InMemoryCreativeStore {
    async fn count_creatives(
        &self,
        customer_id: &CustomerId,
        ad_group_id: &AdGroupId,
        subfolders: &[String],
    ) -> Result<usize, GatewayError> {
        let count = subfolders
            .iter()
            .map(|sub| {
                let folder = folder_path(customer_id, ad_group_id, sub);
                self.folders.get(&folder).map_or(0, |v| v.len())
            })
            .sum();
        Ok(count)
    }

    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<(), GatewayError> {
        self.folders
            .entry(folder.to_string())
            .or_default()
            .push(StoredCreative {
                file_name: file_name.to_string(),
                bytes,
            });
        Ok(())
    }
}
