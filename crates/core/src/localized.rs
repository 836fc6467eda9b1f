//! Bilingual field resolution for CMS records.
//!
//! The CMS stores translations as sibling fields (`titleEn`, `titleFr`)
//! rather than a locale-keyed map. [`resolve`] reads the requested variant
//! and falls back to another locale when it is missing or empty.

use serde_json::Value;

use crate::locale::{Locale, DEFAULT_FALLBACK};

/// Key of the per-language variant of `field` (`title` → `titleFr`).
pub fn localized_key(field: &str, locale: Locale) -> String {
    format!("{field}{}", locale.field_suffix())
}

/// Resolve `field` of `content` for `locale`, falling back to English.
///
/// See [`resolve_with_fallback`].
pub fn resolve(content: Option<&Value>, field: &str, locale: Locale) -> String {
    resolve_with_fallback(content, field, locale, DEFAULT_FALLBACK)
}

/// Resolve `field` of `content` for `locale`, falling back to `fallback`.
///
/// Returns the `<field><Locale>` value when it is a non-empty string,
/// otherwise the `<field><Fallback>` value when it is a string, otherwise
/// `""`. Never fails and never mutates `content`.
pub fn resolve_with_fallback(
    content: Option<&Value>,
    field: &str,
    locale: Locale,
    fallback: Locale,
) -> String {
    let Some(content) = content else {
        return String::new();
    };

    if let Some(Value::String(s)) = content.get(localized_key(field, locale)) {
        if !s.is_empty() {
            return s.clone();
        }
    }

    if locale != fallback {
        if let Some(Value::String(s)) = content.get(localized_key(field, fallback)) {
            return s.clone();
        }
    }

    String::new()
}

/// Like [`resolve`], but maps an empty result to `None`.
pub fn resolve_opt(content: Option<&Value>, field: &str, locale: Locale) -> Option<String> {
    let value = resolve(content, field, locale);
    (!value.is_empty()).then_some(value)
}

/// Read a plain, non-localized string field.
pub fn plain_str(content: &Value, field: &str) -> Option<String> {
    content
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
