//! Supported site locales and `Accept-Language` negotiation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A language variant of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
}

/// Locale used when a translation is missing.
pub const DEFAULT_FALLBACK: Locale = Locale::En;

/// Every locale the site is published in, in menu order.
pub const ALL_LOCALES: &[Locale] = &[Locale::En, Locale::Fr];

impl Locale {
    /// Lowercase tag used in URLs (`en`, `fr`).
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Capitalized suffix used by the CMS for per-language sibling fields
    /// (`title` + `Fr` = `titleFr`).
    pub fn field_suffix(self) -> &'static str {
        match self {
            Locale::En => "En",
            Locale::Fr => "Fr",
        }
    }

    /// Parse a locale tag. Only the primary subtag is considered, so
    /// `fr-CA` maps to [`Locale::Fr`].
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    ///
    /// Entries are ranked by their `q` weight (default `1.0`); ties keep
    /// header order. An entry whose weight does not parse is ignored. Falls back to `default` when nothing matches.
    pub fn negotiate(accept_language: Option<&str>, default: Locale) -> Locale {
        let Some(header) = accept_language else {
            return default;
        };

        let mut ranked: Vec<(f32, Locale)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let locale = Locale::from_code(tag)?;
                let q = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
                    Some(q) => q.trim().parse::<f32>().unwrap_or(0.0),
                    None => 1.0,
                };
                (q > 0.0).then_some((q, locale))
            })
            .collect();

        // Stable sort keeps header order among equal weights.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.first().map(|(_, l)| *l).unwrap_or(default)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            other => Err(format!("Unsupported locale '{other}'")),
        }
    }
}
