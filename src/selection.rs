//! Selection state for indexing operations.
//!
//! Tracks the three mutually dependent choices an operator makes before
//! building an index: the embedding artifact, the target provider, and the
//! index mode. The index mode must belong to the selected provider's
//! supported set at all times; every transition that could break that
//! invariant restores it.

use crate::error::{Error, Result};
use crate::providers::{self, Platform, FALLBACK_PROVIDER};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The operator's current choices. Mutated only through the methods below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Selected embedding artifact id; empty means nothing selected.
    pub embedding_artifact: String,

    /// Target vector store provider id.
    pub provider_id: String,

    /// Index mode, always one of `modes_for(provider_id)`.
    pub index_mode: String,
}

impl Selection {
    /// Initial selection for a platform: the fallback provider and its
    /// default mode, no embedding artifact.
    pub fn for_platform(platform: Platform) -> Self {
        let mut selection = Self {
            embedding_artifact: String::new(),
            provider_id: FALLBACK_PROVIDER.to_string(),
            index_mode: providers::default_mode(FALLBACK_PROVIDER)
                .expect("fallback provider is in the catalog")
                .to_string(),
        };
        selection.initialize(platform);
        selection
    }

    /// Re-check the active provider against the platform. If it is no
    /// longer available, fall back to the default provider and its mode.
    pub fn initialize(&mut self, platform: Platform) {
        if !providers::is_provider_supported(&self.provider_id, platform) {
            debug!(
                "Provider '{}' unavailable on this platform, falling back to '{}'",
                self.provider_id, FALLBACK_PROVIDER
            );
            self.provider_id = FALLBACK_PROVIDER.to_string();
            self.index_mode = providers::default_mode(FALLBACK_PROVIDER)
                .expect("fallback provider is in the catalog")
                .to_string();
        }
    }

    /// Select an embedding artifact. Empty clears the selection.
    pub fn set_embedding_artifact(&mut self, artifact_id: &str) {
        self.embedding_artifact = artifact_id.to_string();
    }

    /// Switch to a provider available on `platform`.
    ///
    /// Always re-anchors the index mode to the new provider's default,
    /// even when the previous mode also exists for the new provider.
    pub fn set_provider(&mut self, platform: Platform, provider_id: &str) -> Result<()> {
        if !providers::available_providers(platform)
            .iter()
            .any(|p| p.id == provider_id)
        {
            return Err(Error::ProviderUnavailable(provider_id.to_string()));
        }

        self.provider_id = provider_id.to_string();
        self.index_mode = providers::default_mode(provider_id)?.to_string();
        Ok(())
    }

    /// Select an index mode supported by the current provider.
    pub fn set_index_mode(&mut self, mode: &str) -> Result<()> {
        if !providers::modes_for(&self.provider_id)?.contains(&mode) {
            return Err(Error::InvalidMode {
                provider: self.provider_id.clone(),
                mode: mode.to_string(),
            });
        }

        self.index_mode = mode.to_string();
        Ok(())
    }

    /// Whether an embedding artifact has been selected.
    pub fn has_artifact(&self) -> bool {
        !self.embedding_artifact.is_empty()
    }
}
