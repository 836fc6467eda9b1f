//! Repository for the `user_sessions` table.
//!
//! A session row backs one refresh token. Refreshing consumes the row and
//! issues a new one, so every refresh token is redeemable exactly once.

use atelier_core::types::UserId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        user_agent, created_at, updated_at";

/// Refresh-session storage.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a freshly issued refresh token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Redeem the live session holding `hash`, marking it revoked.
    ///
    /// The check and the revocation are one statement. Of any number of
    /// concurrent callers presenting the same token, at most one gets the
    /// row back; the rest (and callers with revoked or expired tokens) get
    /// `None`.
    pub async fn consume(pool: &PgPool, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Number of sessions a member could still refresh.
    pub async fn count_live(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_sessions
             WHERE user_id = $1 AND is_revoked = false AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// End every live session of a member (sign-out, password change).
    /// Returns how many were ended.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let done = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(done.rows_affected())
    }
}
