//! Domain logic for the Atelier site: locales, bilingual field resolution,
//! CMS projection fragments, the member profile schema and the site copy.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod locale;
pub mod localized;
pub mod messages;
pub mod profile;
pub mod projection;
pub mod types;
