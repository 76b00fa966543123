//! # REST API Components
//!
//! REST API implementation for the Rollcall service: HTTP routing,
//! middleware wiring, request/response handling, and error mapping.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
