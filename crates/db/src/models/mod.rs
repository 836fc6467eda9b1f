//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and the DTOs used to insert it.

pub mod profile;
pub mod session;
pub mod user;
