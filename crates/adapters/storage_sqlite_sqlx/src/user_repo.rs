//! `SQLite` implementation of [`UserRepository`].

use std::collections::BTreeSet;

use sqlx::SqlitePool;

use libcat_app::ports::UserRepository;
use libcat_domain::error::CatalogError;
use libcat_domain::id::UserId;
use libcat_domain::user::User;

use crate::error::StorageError;

const INSERT: &str = "INSERT INTO users (id, username) VALUES (?, ?)";
const INSERT_PERMISSION: &str = "INSERT INTO user_permissions (user_id, permission) VALUES (?, ?)";
const SELECT_USERNAME_BY_ID: &str = "SELECT username FROM users WHERE id = ?";
const SELECT_PERMISSIONS: &str = "SELECT permission FROM user_permissions WHERE user_id = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new user together with its permissions.
    ///
    /// # Errors
    ///
    /// Returns a storage error if an insert fails (e.g. duplicate username).
    pub async fn insert(&self, user: &User) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(INSERT)
            .bind(user.id.to_string())
            .bind(&user.username)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        for permission in &user.permissions {
            sqlx::query(INSERT_PERMISSION)
                .bind(user.id.to_string())
                .bind(permission)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}

impl UserRepository for SqliteUserRepository {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError> {
        let username: Option<String> = sqlx::query_scalar(SELECT_USERNAME_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let Some(username) = username else {
            return Ok(None);
        };

        let permissions: Vec<String> = sqlx::query_scalar(SELECT_PERMISSIONS)
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Some(User {
            id,
            username,
            permissions: permissions.into_iter().collect::<BTreeSet<_>>(),
        }))
    }
}
