//! Identity resolution for authenticated requests.
//!
//! Turns a validated token subject into the current user record. Because
//! tokens carry no server-side state, this lookup is also the system's only
//! approximation of revocation: deleting a user invalidates every token
//! issued for them, signature and expiry notwithstanding.

use std::sync::Arc;

use tracing::instrument;

use crate::auth::user::User;
use crate::errors::{Error, Result};
use crate::storage::repositories::{SqlxUserRepository, UserRepository};

/// Resolves token subjects to user records on every authenticated request.
#[derive(Clone)]
pub struct IdentityResolver {
    repository: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub fn with_sqlx(pool: crate::storage::DbPool) -> Self {
        Self::new(Arc::new(SqlxUserRepository::new(pool)))
    }

    /// Look up the user record backing a token subject (email).
    ///
    /// Fails with `NotFound` when the record is missing, including the case
    /// of a user deleted after token issuance.
    #[instrument(skip(self), fields(subject = %subject))]
    pub async fn resolve(&self, subject: &str) -> Result<User> {
        let email = User::normalize_email(subject);
        self.repository
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| Error::not_found("User", email))
    }
}
