//! indexctl: operator console for a vector-indexing backend
//!
//! Selects embedding artifacts, providers, and index modes; builds indexes
//! and manages the resulting collections through the backend's REST API.

pub mod backend;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod selection;
pub mod session;
