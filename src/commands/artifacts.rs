//! Embedding artifact listing

use crate::backend::{BackendClient, EmbeddingArtifact};
use crate::error::Result;
use tracing::info;

/// List the embedding artifacts the backend has available for indexing.
pub async fn cmd_list_artifacts(client: &BackendClient) -> Result<Vec<EmbeddingArtifact>> {
    info!("Listing embedding artifacts");
    client.list_artifacts().await
}

/// Print artifacts to console
pub fn print_artifacts(artifacts: &[EmbeddingArtifact]) {
    println!("\nEmbedding Artifacts\n");

    if artifacts.is_empty() {
        println!("No embedding artifacts found. Produce embeddings first, then re-run.");
        return;
    }

    for artifact in artifacts {
        println!("• {}", artifact.display_name);
    }
    println!("\n{} artifact(s)", artifacts.len());
}
