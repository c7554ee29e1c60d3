//! CiteShelf Common Library
//!
//! Shared code for the CiteShelf publication service:
//! - Publication entity and store gateway
//! - Error types and HTTP mapping
//! - Configuration management
//! - Metrics helpers

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
