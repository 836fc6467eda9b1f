//! Handlers for the `/auth` resource (signup, login, refresh, logout).

use atelier_core::error::CoreError;
use atelier_core::locale::Locale;
use atelier_core::profile::{Role, SignupForm};
use atelier_core::types::UserId;
use atelier_db::models::profile::CreateProfile;
use atelier_db::models::session::CreateSession;
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::{ProfileRepo, SessionRepo, UserRepo};
use axum::extract::State;
use axum::http::header::{ACCEPT_LANGUAGE, SET_COOKIE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by signup, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account and its profile. The profile's language defaults to
/// the one negotiated from `Accept-Language`.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SignupForm>,
) -> AppResult<Response> {
    let locale = Locale::negotiate(
        headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
        state.config.default_locale,
    );

    let role = input
        .check()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg.text(locale).to_string())))?;
    let email = input.normalized_email();

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create_with_profile(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
        },
        &CreateProfile {
            full_name: input.full_name.trim().to_string(),
            role,
            languages: vec![locale.code().to_string()],
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, role = ?role, "Account created");

    let (response, cookie) =
        create_auth_response(&state, user.id, &user.email, role, user_agent(&headers)).await?;

    Ok((StatusCode::CREATED, [(SET_COOKIE, cookie)], Json(response)).into_response())
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens
/// and sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let email = input.email.trim().to_lowercase();

    // 1. Find account by email.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 3. Resolve role for JWT claims.
    let role = ProfileRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .and_then(|p| p.role());

    // 4. Generate tokens and create session.
    let (response, cookie) =
        create_auth_response(&state, user.id, &user.email, role, user_agent(&headers)).await?;

    Ok(([(SET_COOKIE, cookie)], Json(response)).into_response())
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Response> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Consume the session it belongs to. Each refresh token is good for
    //    exactly one rotation, including under concurrent requests.
    let session = SessionRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Find account and its current role.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;

    let role = ProfileRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .and_then(|p| p.role());

    // 4. Generate new tokens and create new session.
    let (response, cookie) =
        create_auth_response(&state, user.id, &user.email, role, user_agent(&headers)).await?;

    Ok(([(SET_COOKIE, cookie)], Json(response)).into_response())
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated member and clear the session
/// cookie. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Response> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = %auth_user.user_id, revoked, "Signed out");

    let cookie = clear_session_cookie(state.config.secure_cookies);
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]).into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Generate access + refresh tokens, persist a session row, and build the
/// response body and session cookie.
async fn create_auth_response(
    state: &AppState,
    user_id: UserId,
    email: &str,
    role: Option<Role>,
    user_agent: Option<String>,
) -> AppResult<(AuthResponse, String)> {
    let access_token = generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
        user_agent,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;
    let cookie = session_cookie(&access_token, expires_in, state.config.secure_cookies);

    Ok((
        AuthResponse {
            access_token,
            refresh_token: refresh_plaintext,
            expires_in,
            user: UserInfo {
                id: user_id,
                email: email.to_string(),
                role,
            },
        },
        cookie,
    ))
}
