//! Default values for configuration

/// Default indexing backend URL for local development
pub fn default_backend_url() -> String {
    std::env::var("INDEXCTL_BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

/// Default request timeout in seconds
pub fn default_timeout_secs() -> u64 {
    30
}

/// Default vector store provider
pub fn default_provider() -> String {
    "chroma".to_string()
}
