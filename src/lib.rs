//! # Rollcall
//!
//! Rollcall is a role-based-access-control (RBAC) user directory service:
//! it authenticates users against stored credentials, issues signed bearer
//! tokens, and exposes paginated CRUD operations on the directory, gated by
//! role.
//!
//! ## Architecture
//!
//! ```text
//! REST API Layer → Auth Core (hashing, tokens, identity, role gate)
//!      ↓                    ↓
//! Error Mapping      Persistence Layer (sqlx / SQLite)
//! ```
//!
//! ## Core Components
//!
//! - **REST API**: Axum-based HTTP server for login and user management
//! - **Auth Core**: Argon2id credential hashing, JWT issuance/validation,
//!   identity resolution, and the principal role gate
//! - **Persistence Layer**: SQLx with SQLite for the user directory

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
