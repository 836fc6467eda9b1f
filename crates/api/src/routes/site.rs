//! Locale-prefixed site routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{actions, member, pages};
use crate::state::AppState;

/// Pages, member area and member actions.
///
/// ```text
/// GET  /                                   -> 303 to /{negotiated locale}
/// GET  /{locale}                           home
/// GET  /{locale}/ventures                  venture list
/// GET  /{locale}/ventures/{slug}           venture detail
/// GET  /{locale}/case-studies              case study list
/// GET  /{locale}/programs                  program list
/// GET  /{locale}/events                    upcoming events
/// GET  /{locale}/team                      team
/// GET  /{locale}/blog                      post list
/// GET  /{locale}/blog/{slug}               post detail
/// GET  /{locale}/login                     sign-in page
///
/// GET  /{locale}/profile                   member profile (session required)
/// GET  /{locale}/settings                  account settings (session required)
/// GET  /{locale}/dashboard                 role dashboard (session required)
///
/// POST /{locale}/actions/profile           update profile
/// POST /{locale}/actions/role              select role (onboarding)
/// POST /{locale}/actions/password          change password
/// POST /{locale}/actions/delete-account    delete account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/{locale}", get(pages::home))
        .route("/{locale}/ventures", get(pages::ventures))
        .route("/{locale}/ventures/{slug}", get(pages::venture))
        .route("/{locale}/case-studies", get(pages::case_studies))
        .route("/{locale}/programs", get(pages::programs))
        .route("/{locale}/events", get(pages::events))
        .route("/{locale}/team", get(pages::team))
        .route("/{locale}/blog", get(pages::blog))
        .route("/{locale}/blog/{slug}", get(pages::post))
        .route("/{locale}/login", get(pages::login))
        // Member area.
        .route("/{locale}/profile", get(member::profile))
        .route("/{locale}/settings", get(member::settings))
        .route("/{locale}/dashboard", get(member::dashboard))
        // Member actions.
        .route("/{locale}/actions/profile", post(actions::update_profile))
        .route("/{locale}/actions/role", post(actions::select_role))
        .route("/{locale}/actions/password", post(actions::change_password))
        .route("/{locale}/actions/delete-account", post(actions::delete_account))
}
