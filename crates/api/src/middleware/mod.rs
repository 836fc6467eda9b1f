//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- Requires a valid access token.
//! - [`auth::Session`] -- The signed-in member, if any; never rejects.
//! - [`locale::SiteLocale`] -- The `{locale}` path segment.

pub mod auth;
pub mod locale;
