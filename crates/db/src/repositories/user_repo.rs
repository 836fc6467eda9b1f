//! Repository for the `users` table.

use atelier_core::types::UserId;
use sqlx::PgPool;

use crate::models::profile::CreateProfile;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert an account and its profile in one transaction, returning the
    /// created user row.
    pub async fn create_with_profile(
        pool: &PgPool,
        user: &CreateUser,
        profile: &CreateProfile,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO profiles (user_id, full_name, role, languages)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(created.id)
        .bind(&profile.full_name)
        .bind(profile.role.map(|r| r.as_str()))
        .bind(&profile.languages)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Find an account by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by (lowercased) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace the password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: UserId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an account. Profile and sessions cascade.
    ///
    /// Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
