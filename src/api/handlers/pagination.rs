//! Shared pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default limit for paginated list queries.
pub fn default_limit() -> i64 {
    50
}

/// Standardized paginated response wrapper for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// The list of items for the current page
    pub items: Vec<T>,
    /// Total number of items matching the query (across all pages)
    pub total: i64,
    /// Applied limit
    pub limit: i64,
    /// Applied offset
    pub offset: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self { items, total, limit, offset }
    }
}

/// Clamp pagination parameters to safe bounds: `limit` to [1, max_limit],
/// `offset` to >= 0.
pub fn clamp(limit: i64, offset: i64, max_limit: i64) -> (i64, i64) {
    (limit.clamp(1, max_limit), offset.max(0))
}
