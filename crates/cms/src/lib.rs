//! Read-only client for the headless content CMS.
//!
//! - [`client`] -- the [`ContentSource`] seam and its HTTP implementation.
//! - [`queries`] -- GROQ query text for each marketing page.
//! - [`fetch`] -- page data-fetchers returning plain JSON records.
//! - [`image`] -- CDN URLs for image asset references.

pub mod client;
pub mod config;
pub mod fetch;
pub mod image;
pub mod queries;

pub use client::{CmsClient, CmsError, ContentSource, QueryParams};
pub use config::CmsConfig;
