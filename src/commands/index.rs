//! Index construction command

use crate::backend::{BackendClient, IndexingOutcome};
use crate::error::Result;
use crate::session::Session;

/// Options for `indexctl index`
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Embedding artifact id (file name) to index
    pub artifact: String,

    /// Target provider; the session default when absent
    pub provider: Option<String>,

    /// Index mode; the provider's default when absent
    pub mode: Option<String>,
}

/// Apply the operator's choices as selection transitions, then build.
///
/// Ordering matters: the provider switch re-anchors the mode to the new
/// provider's default, so an explicit mode is applied after it.
pub async fn cmd_build_index(
    session: &mut Session,
    client: &BackendClient,
    options: IndexOptions,
) -> Result<IndexingOutcome> {
    if let Some(provider) = &options.provider {
        session.select_provider(client, provider).await?;
    }
    if let Some(mode) = &options.mode {
        session.select_index_mode(mode)?;
    }
    session.select_artifact(&options.artifact);

    session.build_index(client).await
}
