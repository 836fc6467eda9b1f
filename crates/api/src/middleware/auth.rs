//! JWT-based authentication extractors for Axum handlers.

use std::convert::Infallible;

use atelier_core::error::CoreError;
use atelier_core::types::UserId;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::cookie::{read_cookie, ACCESS_TOKEN_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated member extracted from the access token.
///
/// The token is read from a `Bearer` `Authorization` header, or from the
/// session cookie when no header is present:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account id (from `claims.sub`).
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(value) => {
                let header = value.to_str().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization header".into(),
                    ))
                })?;
                header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    ))
                })?
            }
            None => read_cookie(&parts.headers, ACCESS_TOKEN_COOKIE).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Not signed in".into()))
            })?,
        };

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// The signed-in member, or `None` for anonymous and invalid sessions.
///
/// Pages use this to redirect to the login page and actions use it to
/// answer with a failure result instead of an error response.
#[derive(Debug, Clone)]
pub struct Session(pub Option<AuthUser>);

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(Session(Some(user))),
            Err(e) => {
                if parts.headers.contains_key(AUTHORIZATION)
                    || read_cookie(&parts.headers, ACCESS_TOKEN_COOKIE).is_some()
                {
                    tracing::debug!(error = %e, "Ignoring unusable session credentials");
                }
                Ok(Session(None))
            }
        }
    }
}
