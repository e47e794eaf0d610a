//! Provider capability registry for vector store backends.
//!
//! Static catalog of the providers the indexing backend can target, the
//! index modes each one supports, and platform compatibility rules.

use crate::error::{Error, Result};
use serde::Serialize;

/// Host platform family, used for provider compatibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the platform family this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// A vector store provider and the index modes it supports.
///
/// Mode order is meaningful: the first entry is the provider's default.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProviderSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub modes: &'static [&'static str],
}

/// Full provider catalog, in display order.
pub const PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        id: "chroma",
        name: "Chroma",
        modes: &["hnsw"],
    },
    ProviderSpec {
        id: "milvus",
        name: "Milvus",
        modes: &["flat", "ivf_flat", "ivf_sq8", "hnsw"],
    },
    ProviderSpec {
        id: "pinecone",
        name: "Pinecone",
        modes: &["standard", "hybrid"],
    },
    ProviderSpec {
        id: "qdrant",
        name: "Qdrant",
        modes: &["hnsw", "custom"],
    },
    ProviderSpec {
        id: "weaviate",
        name: "Weaviate",
        modes: &["hnsw", "flat"],
    },
    ProviderSpec {
        id: "faiss",
        name: "FAISS",
        modes: &["flat", "ivf", "hnsw"],
    },
];

/// Provider to fall back to when the active one is unavailable.
pub const FALLBACK_PROVIDER: &str = "chroma";

/// Providers excluded on specific platform families.
///
/// Checked by `is_provider_supported`; new exclusions are additive rows.
const PLATFORM_EXCLUSIONS: &[(&str, Platform)] = &[("milvus", Platform::Windows)];

/// Look up a provider by id.
pub fn find_provider(provider_id: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|p| p.id == provider_id)
}

/// Index modes supported by a provider, default first.
pub fn modes_for(provider_id: &str) -> Result<&'static [&'static str]> {
    find_provider(provider_id)
        .map(|p| p.modes)
        .ok_or_else(|| Error::UnknownProvider(provider_id.to_string()))
}

/// The default index mode for a provider.
pub fn default_mode(provider_id: &str) -> Result<&'static str> {
    // Catalog entries are non-empty, so first() cannot miss.
    modes_for(provider_id).map(|modes| modes[0])
}

/// Whether a provider can be used on the given platform.
pub fn is_provider_supported(provider_id: &str, platform: Platform) -> bool {
    !PLATFORM_EXCLUSIONS
        .iter()
        .any(|(excluded, on)| *excluded == provider_id && *on == platform)
}

/// The providers usable on the given platform, in catalog order.
pub fn available_providers(platform: Platform) -> Vec<&'static ProviderSpec> {
    PROVIDERS
        .iter()
        .filter(|p| is_provider_supported(p.id, platform))
        .collect()
}
