//! Locale path-segment extractor.

use atelier_core::error::CoreError;
use atelier_core::locale::Locale;
use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::request::Parts;

use crate::error::AppError;

/// Name of the path parameter carrying the locale.
const LOCALE_PARAM: &str = "locale";

/// The locale named by the `{locale}` path segment.
///
/// Works on routes with additional parameters (`/{locale}/blog/{slug}`).
/// An unsupported locale is a 404.
#[derive(Debug, Clone, Copy)]
pub struct SiteLocale(pub Locale);

impl<S> FromRequestParts<S> for SiteLocale
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InternalError(format!("Path parameters unavailable: {e}")))?;

        let raw = params
            .iter()
            .find(|(name, _)| *name == LOCALE_PARAM)
            .map(|(_, value)| value.to_string())
            .ok_or_else(|| AppError::InternalError("Route has no locale parameter".into()))?;

        let locale = raw.parse::<Locale>().map_err(|_| {
            AppError::Core(CoreError::NotFound {
                entity: "Locale",
                id: raw.clone(),
            })
        })?;
        Ok(SiteLocale(locale))
    }
}
