//! Collection listing, inspection, and deletion

use crate::backend::{BackendClient, Collection, IndexingOutcome};
use crate::error::Result;
use crate::session::Session;
use tracing::info;

/// Fetch normalized details for one collection.
pub async fn cmd_describe_collection(
    session: &mut Session,
    client: &BackendClient,
    collection_name: &str,
) -> Result<IndexingOutcome> {
    info!(
        "Describing collection '{}' on provider '{}'",
        collection_name, session.selection.provider_id
    );
    session.describe_collection(client, collection_name).await
}

/// Delete one collection; `confirmed` must already reflect the operator's
/// explicit answer. Returns whether a deletion was performed.
pub async fn cmd_delete_collection(
    session: &mut Session,
    client: &BackendClient,
    collection_name: &str,
    confirmed: bool,
) -> Result<bool> {
    session
        .delete_collection(client, collection_name, confirmed)
        .await
}

/// Print a collection listing to console
pub fn print_collections(provider_id: &str, collections: &[Collection]) {
    println!("\nCollections ({})\n", provider_id);

    if collections.is_empty() {
        println!("No collections found for this provider.");
        return;
    }

    for collection in collections {
        println!("• {} ({} documents)", collection.name, collection.count);
    }
}

/// Print an indexing outcome to console. Optional fields are only printed
/// when the backend reported them.
pub fn print_outcome(outcome: &IndexingOutcome) {
    println!("\nIndexing Results\n");
    println!("  Database: {}", outcome.database);
    if let Some(mode) = &outcome.index_mode {
        println!("  Index Mode: {}", mode);
    }
    println!("  Total Vectors: {}", outcome.total_vectors);
    println!("  Index Size: {}", outcome.index_size);
    if let Some(seconds) = outcome.processing_time {
        println!("  Processing Time: {}s", seconds);
    }
    println!("  Collection Name: {}", outcome.collection_name);
}
