//! GROQ projection fragments for bilingual fields.
//!
//! These are text templates only; field names are not validated.

use crate::locale::{Locale, ALL_LOCALES};
use crate::localized::localized_key;

/// Project every language variant of each field, in input order.
///
/// `["title"]` → `titleEn, titleFr`.
pub fn dual_projection(fields: &[&str]) -> String {
    fields
        .iter()
        .flat_map(|field| ALL_LOCALES.iter().map(move |l| localized_key(field, *l)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Project a single language variant of each field under its base name.
///
/// `["title"]`, `fr` → `"title": titleFr`.
pub fn aliased_projection(fields: &[&str], locale: Locale) -> String {
    fields
        .iter()
        .map(|field| format!("\"{field}\": {}", localized_key(field, locale)))
        .collect::<Vec<_>>()
        .join(", ")
}
