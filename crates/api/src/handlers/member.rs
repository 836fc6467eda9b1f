//! Auth-gated member pages.
//!
//! Without a usable session every page redirects (303) to the login page of
//! the same locale and touches nothing in the store.

use atelier_core::locale::Locale;
use atelier_db::repositories::{ProfileRepo, UserRepo};
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::Session;
use crate::middleware::locale::SiteLocale;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views;

fn login_redirect(locale: Locale) -> Response {
    Redirect::to(&views::localized_path(locale, "/login")).into_response()
}

/// GET /{locale}/profile
pub async fn profile(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
) -> AppResult<Response> {
    let Some(user) = session else {
        return Ok(login_redirect(locale));
    };
    let Some(profile) = ProfileRepo::find_by_user_id(&state.pool, user.user_id).await? else {
        return Ok(login_redirect(locale));
    };

    Ok(Json(DataResponse {
        data: views::profile_page(locale, profile),
    })
    .into_response())
}

/// GET /{locale}/settings
pub async fn settings(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
) -> AppResult<Response> {
    let Some(user) = session else {
        return Ok(login_redirect(locale));
    };
    let Some(account) = UserRepo::find_by_id(&state.pool, user.user_id).await? else {
        return Ok(login_redirect(locale));
    };
    let Some(profile) = ProfileRepo::find_by_user_id(&state.pool, user.user_id).await? else {
        return Ok(login_redirect(locale));
    };

    Ok(Json(DataResponse {
        data: views::settings_page(locale, account.email, profile),
    })
    .into_response())
}

/// GET /{locale}/dashboard
///
/// The dashboard variant follows the stored role; members without a role
/// see the onboarding dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
) -> AppResult<Response> {
    let Some(user) = session else {
        return Ok(login_redirect(locale));
    };
    let Some(profile) = ProfileRepo::find_by_user_id(&state.pool, user.user_id).await? else {
        return Ok(login_redirect(locale));
    };

    Ok(Json(DataResponse {
        data: views::dashboard_page(locale, &profile),
    })
    .into_response())
}
