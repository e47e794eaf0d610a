//! Status command implementation

use crate::backend::BackendClient;
use crate::config::Config;
use crate::providers::{self, Platform};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Per-provider status line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub id: String,
    pub name: String,
    pub default_mode: String,
    pub collection_count: usize,
}

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub backend_url: String,
    pub backend_reachable: bool,
    pub artifact_count: usize,
    pub providers: Vec<ProviderStatus>,
}

/// Get backend and provider status for the current platform.
pub async fn cmd_status(config: &Config, client: &BackendClient, platform: Platform) -> StatusInfo {
    info!("Getting status");

    // Reachability is probed through the artifact listing; a failure there
    // reads as an unreachable backend rather than an error.
    let (backend_reachable, artifact_count) = match client.list_artifacts().await {
        Ok(artifacts) => (true, artifacts.len()),
        Err(e) => {
            tracing::debug!("Backend unreachable: {:?}", e);
            (false, 0)
        }
    };

    let mut provider_status = Vec::new();
    for provider in providers::available_providers(platform) {
        let collection_count = if backend_reachable {
            client.list_collections(provider.id).await.len()
        } else {
            0
        };
        provider_status.push(ProviderStatus {
            id: provider.id.to_string(),
            name: provider.name.to_string(),
            default_mode: provider.modes[0].to_string(),
            collection_count,
        });
    }

    StatusInfo {
        backend_url: config.backend_url.clone(),
        backend_reachable,
        artifact_count,
        providers: provider_status,
    }
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 indexctl Status\n");
    println!("Backend: {}", status.backend_url);

    let connection_status = if status.backend_reachable {
        "✓ Connected"
    } else {
        "✗ Not reachable"
    };
    println!("  Status: {}", connection_status);
    println!("  Embedding artifacts: {}", status.artifact_count);

    println!("\nProviders:");
    for provider in &status.providers {
        println!(
            "  • {} [{}]: {} collection(s), default mode {}",
            provider.name, provider.id, provider.collection_count, provider.default_mode
        );
    }
}
