//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and refresh-token helpers.
//! - [`cookie`] -- the session cookie carrying the access token.

pub mod cookie;
pub mod jwt;
pub mod password;
