//! User lifecycle management.
//!
//! Orchestrates user CRUD between the HTTP handlers and the repository:
//! password hashing on create and update, email normalization and
//! uniqueness, and first-run seeding of the default accounts.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::hashing;
use crate::auth::user::{CreateUserRequest, NewUser, Role, UpdateUser, UpdateUserRequest, User};
use crate::domain::UserId;
use crate::errors::{Error, Result};
use crate::storage::repositories::{SqlxUserRepository, UserFilter, UserRepository};

/// Accounts created on an empty directory so the service is usable out of
/// the box. The principal account is the only way to reach the admin tier
/// on a fresh install.
const DEFAULT_USERS: &[(&str, &str, &str, Role)] = &[
    ("Principal User", "principal@school.com", "principal123", Role::Principal),
    ("Teacher User", "teacher@school.com", "teacher123", Role::Teacher),
    ("Student User", "student@school.com", "student123", Role::Student),
];

/// Service for managing user accounts.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub fn with_sqlx(pool: crate::storage::DbPool) -> Self {
        Self::new(Arc::new(SqlxUserRepository::new(pool)))
    }

    /// Create a new user account.
    ///
    /// The email is normalized before storage and must be unique; the
    /// password is hashed and the plaintext discarded.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let email = User::normalize_email(&request.email);

        if self.repository.get_user_by_email(&email).await?.is_some() {
            return Err(Error::conflict(format!("User with email '{}' already exists", email)));
        }

        let password_hash = hashing::hash_password(&request.password)?;

        let user = self
            .repository
            .create_user(NewUser {
                id: UserId::new(),
                email,
                password_hash,
                name: request.name,
                role: request.role,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, role = %user.role, "user created");

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        self.repository.get_user(id).await
    }

    /// List users matching the filter, newest first, with the total count
    /// across all pages.
    pub async fn list_users(
        &self,
        limit: i64,
        offset: i64,
        filter: &UserFilter,
    ) -> Result<(Vec<User>, i64)> {
        let users = self.repository.list_users(limit, offset, filter).await?;
        let total = self.repository.count_users(filter).await?;
        Ok((users, total))
    }

    /// Apply a partial update to an existing user.
    ///
    /// A changed email is re-normalized and checked for uniqueness against
    /// other accounts; a supplied password is re-hashed.
    #[instrument(skip(self, request), fields(user_id = %id))]
    pub async fn update_user(&self, id: &UserId, request: UpdateUserRequest) -> Result<User> {
        let current = self
            .repository
            .get_user(id)
            .await?
            .ok_or_else(|| Error::not_found("User", id.to_string()))?;

        let email = match request.email {
            Some(email) => {
                let normalized = User::normalize_email(&email);
                if normalized != current.email
                    && self.repository.get_user_by_email(&normalized).await?.is_some()
                {
                    return Err(Error::conflict(format!(
                        "User with email '{}' already exists",
                        normalized
                    )));
                }
                Some(normalized)
            }
            None => None,
        };

        let password_hash = match request.password {
            Some(password) => Some(hashing::hash_password(&password)?),
            None => None,
        };

        let user = self
            .repository
            .update_user(
                id,
                UpdateUser { email, name: request.name, password_hash, role: request.role },
            )
            .await?;

        info!(user_id = %user.id, "user updated");

        Ok(user)
    }

    /// Delete a user. Deletion is immediate and unconditional; any token
    /// issued for the account stops resolving from this point on.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let removed = self.repository.delete_user(id).await?;
        if removed == 0 {
            return Err(Error::not_found("User", id.to_string()));
        }

        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Seed the default accounts when the directory is empty.
    #[instrument(skip(self))]
    pub async fn ensure_default_users(&self) -> Result<()> {
        let existing = self.repository.count_users(&UserFilter::default()).await?;
        if existing > 0 {
            return Ok(());
        }

        for (name, email, password, role) in DEFAULT_USERS {
            self.repository
                .create_user(NewUser {
                    id: UserId::new(),
                    email: (*email).to_string(),
                    password_hash: hashing::hash_password(password)?,
                    name: (*name).to_string(),
                    role: *role,
                })
                .await?;
        }

        info!(count = DEFAULT_USERS.len(), "default users created");
        Ok(())
    }
}
