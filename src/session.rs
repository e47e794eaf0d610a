//! Session state for the indexing console.
//!
//! A `Session` owns the operator's `Selection`, the cached collection
//! listing for the selected provider, and the last user-facing status line.
//! Provider changes, builds, and deletes refresh the listing as explicit
//! post-conditions of the operation, so ordering stays deterministic.
//!
//! All operations take `&mut self`, which also serializes builds: a second
//! build cannot start while one is in flight.

use crate::backend::{BackendClient, Collection, IndexingOutcome};
use crate::error::{Error, Result};
use crate::providers::Platform;
use crate::selection::Selection;
use tracing::{debug, warn};

/// Session-local state. Created at startup, discarded at exit; nothing here
/// is persisted.
#[derive(Debug)]
pub struct Session {
    platform: Platform,
    pub selection: Selection,
    pub collections: Vec<Collection>,
    pub selected_collection: Option<String>,
    status: Option<String>,
}

impl Session {
    /// Start a session for the given platform: fallback provider, its
    /// default mode, nothing selected, no cached collections.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            selection: Selection::for_platform(platform),
            collections: Vec::new(),
            selected_collection: None,
            status: None,
        }
    }

    /// Start a session preferring `provider_id` (usually from config).
    /// When that provider is unknown or excluded on this platform, the
    /// platform fallback from `new` stays selected.
    pub fn with_default_provider(platform: Platform, provider_id: &str) -> Self {
        let mut session = Self::new(platform);
        if let Err(e) = session.selection.set_provider(platform, provider_id) {
            warn!("Configured default provider unavailable: {}", e);
        }
        session
    }

    /// The last user-facing status line, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn select_artifact(&mut self, artifact_id: &str) {
        self.selection.set_embedding_artifact(artifact_id);
    }

    pub fn select_index_mode(&mut self, mode: &str) -> Result<()> {
        self.selection.set_index_mode(mode)
    }

    pub fn select_collection(&mut self, collection_id: &str) {
        self.selected_collection = Some(collection_id.to_string());
    }

    /// Switch providers and refresh the collection listing for the new one.
    /// The listing is provider-scoped, so the old cache is never left
    /// visible under the new selection.
    pub async fn select_provider(&mut self, client: &BackendClient, provider_id: &str) -> Result<()> {
        self.selection.set_provider(self.platform, provider_id)?;
        self.refresh_collections(client).await;
        Ok(())
    }

    /// Replace the cached listing for the current provider. Degrades to an
    /// empty listing on failure; never fails the session.
    pub async fn refresh_collections(&mut self, client: &BackendClient) {
        self.collections = client.list_collections(&self.selection.provider_id).await;
    }

    /// Build an index for the selected artifact on the selected provider.
    ///
    /// Requires an artifact selection; without one, no request is issued.
    /// On success the listing is refreshed so the new collection shows up.
    pub async fn build_index(&mut self, client: &BackendClient) -> Result<IndexingOutcome> {
        if !self.selection.has_artifact() {
            self.set_status("Please select an embedding file");
            return Err(Error::MissingArtifact);
        }

        self.set_status("Indexing...");
        debug!(
            "Indexing '{}' into {} ({})",
            self.selection.embedding_artifact,
            self.selection.provider_id,
            self.selection.index_mode
        );

        match client
            .build_index(
                &self.selection.embedding_artifact,
                &self.selection.provider_id,
                &self.selection.index_mode,
            )
            .await
        {
            Ok(outcome) => {
                self.set_status("Indexing completed successfully");
                self.refresh_collections(client).await;
                Ok(outcome)
            }
            Err(e) => {
                self.set_status(format!("Error during indexing: {}", e));
                Err(e)
            }
        }
    }

    /// Fetch normalized details for a collection of the current provider.
    pub async fn describe_collection(
        &mut self,
        client: &BackendClient,
        collection_name: &str,
    ) -> Result<IndexingOutcome> {
        client
            .describe_collection(&self.selection.provider_id, collection_name)
            .await
    }

    /// Delete a collection of the current provider.
    ///
    /// Deletion is irreversible, so it is gated on `confirmed`: without
    /// confirmation no request is issued and `Ok(false)` is returned. After
    /// a successful delete the selected collection is cleared (it may no
    /// longer exist) and the listing refreshed.
    pub async fn delete_collection(
        &mut self,
        client: &BackendClient,
        collection_name: &str,
        confirmed: bool,
    ) -> Result<bool> {
        if !confirmed {
            debug!("Deletion of '{}' not confirmed, skipping", collection_name);
            return Ok(false);
        }

        match client
            .delete_collection(&self.selection.provider_id, collection_name)
            .await
        {
            Ok(()) => {
                self.selected_collection = None;
                self.refresh_collections(client).await;
                self.set_status(format!("Collection '{}' deleted", collection_name));
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to delete collection '{}': {}", collection_name, e);
                self.set_status(format!(
                    "Failed to delete collection '{}': {}",
                    collection_name, e
                ));
                Err(e)
            }
        }
    }
}
