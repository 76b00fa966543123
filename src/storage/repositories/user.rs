//! User repository for the user directory.
//!
//! Provides CRUD operations for user records, including the password-hash
//! lookup used by authentication and paginated, filtered listing.

use crate::auth::user::{NewUser, Role, UpdateUser, User};
use crate::domain::UserId;
use crate::errors::{Error, Result};
use crate::storage::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::str::FromStr;
use tracing::instrument;

const USER_COLUMNS: &str = "id, email, password_hash, name, role, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter applied to list and count queries.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring match against name and email.
    pub search: Option<String>,
    /// Restrict to a single role.
    pub role: Option<Role>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get a user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Get a user by (normalized) email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get a user together with their password hash for authentication
    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>>;

    /// Update a user's details
    async fn update_user(&self, id: &UserId, update: UpdateUser) -> Result<User>;

    /// List users matching the filter, newest first
    async fn list_users(&self, limit: i64, offset: i64, filter: &UserFilter) -> Result<Vec<User>>;

    /// Count users matching the filter
    async fn count_users(&self, filter: &UserFilter) -> Result<i64>;

    /// Delete a user, returning the number of rows removed
    async fn delete_user(&self, id: &UserId) -> Result<u64>;
}

/// SQLite implementation of [`UserRepository`].
#[derive(Debug, Clone)]
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_user(&self, row: UserRow) -> Result<User> {
        let role = Role::from_str(&row.role)
            .map_err(|_| Error::validation(format!("Unknown user role '{}'", row.role)))?;

        Ok(User {
            id: UserId::from_string(row.id),
            email: row.email,
            name: row.name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Append WHERE clauses for the filter to a list/count query.
fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a UserFilter) {
    let mut has_where = false;

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        builder.push(" WHERE (name LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR email LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
        has_where = true;
    }

    if let Some(role) = filter.role {
        builder.push(if has_where { " AND role = " } else { " WHERE role = " });
        builder.push_bind(role.as_str());
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(skip(self, user), fields(user_email = %user.email, user_id = %user.id), name = "db_create_user")]
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let id = user.id.to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database { source: err, context: "Failed to create user".to_string() })?;

        self.get_user(&user.id)
            .await?
            .ok_or_else(|| Error::internal("User not found after creation"))
    }

    #[instrument(skip(self), fields(user_id = %id), name = "db_get_user")]
    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database { source: err, context: "Failed to fetch user".to_string() })?;

        row.map(|r| self.row_to_user(r)).transpose()
    }

    #[instrument(skip(self), fields(user_email = %email), name = "db_get_user_by_email")]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch user by email".to_string(),
        })?;

        row.map(|r| self.row_to_user(r)).transpose()
    }

    #[instrument(skip(self), fields(user_email = %email), name = "db_get_user_with_password")]
    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch user with password".to_string(),
        })?;

        if let Some(row) = row {
            let password_hash = row.password_hash.clone();
            let user = self.row_to_user(row)?;
            Ok(Some((user, password_hash)))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self, update), fields(user_id = %id), name = "db_update_user")]
    async fn update_user(&self, id: &UserId, update: UpdateUser) -> Result<User> {
        let current = self
            .get_user(id)
            .await?
            .ok_or_else(|| Error::not_found("User", id.to_string()))?;

        let current_hash = self
            .get_user_with_password(&current.email)
            .await?
            .map(|(_, hash)| hash)
            .ok_or_else(|| Error::internal("User row vanished during update"))?;

        let email = update.email.unwrap_or(current.email);
        let name = update.name.unwrap_or(current.name);
        let password_hash = update.password_hash.unwrap_or(current_hash);
        let role = update.role.unwrap_or(current.role);

        sqlx::query(
            r#"
            UPDATE users
            SET email = $1, name = $2, password_hash = $3, role = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&email)
        .bind(&name)
        .bind(&password_hash)
        .bind(role.as_str())
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database { source: err, context: "Failed to update user".to_string() })?;

        self.get_user(id)
            .await?
            .ok_or_else(|| Error::internal("User not found after update"))
    }

    #[instrument(skip(self, filter), fields(limit = limit, offset = offset), name = "db_list_users")]
    async fn list_users(&self, limit: i64, offset: i64, filter: &UserFilter) -> Result<Vec<User>> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to list users".to_string(),
            })?;

        rows.into_iter().map(|r| self.row_to_user(r)).collect()
    }

    #[instrument(skip(self, filter), name = "db_count_users")]
    async fn count_users(&self, filter: &UserFilter) -> Result<i64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to count users".to_string(),
            })?;

        Ok(count)
    }

    #[instrument(skip(self), fields(user_id = %id), name = "db_delete_user")]
    async fn delete_user(&self, id: &UserId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete user".to_string(),
            })?;

        Ok(result.rows_affected())
    }
}
