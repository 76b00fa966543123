//! # Configuration
//!
//! Process-wide configuration for the Rollcall service, loaded once at
//! startup from environment variables.

pub mod settings;

pub use settings::{AppConfig, AuthConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};
