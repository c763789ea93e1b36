//! pkiscope-common — Shared error type and configuration used across all pkiscope crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::{ApiConfig, Config, LinkConfig, LoggingConfig, PageConfig};
pub use error::{PkiscopeError, Result};
