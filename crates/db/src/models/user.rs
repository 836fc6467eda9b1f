//! Account model and DTOs.

use atelier_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new account.
#[derive(Debug)]
pub struct CreateUser {
    /// Lowercased email address.
    pub email: String,
    pub password_hash: String,
}
