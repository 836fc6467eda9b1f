//! Member actions.
//!
//! Every action answers with an [`ActionResult`] and never an error
//! response: 200 on success, 401 without a session, 422 for a rejected
//! submission and 500 when the store fails. Store failures are logged and
//! reported with a generic message.

use atelier_core::locale::Locale;
use atelier_core::messages::Message;
use atelier_core::profile::{DeleteAccountForm, PasswordChangeForm, ProfileForm, RoleSelectionForm};
use atelier_db::repositories::{ProfileRepo, SessionRepo, UserRepo};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::cookie::clear_session_cookie;
use crate::auth::password::{hash_password, verify_password};
use crate::middleware::auth::{AuthUser, Session};
use crate::middleware::locale::SiteLocale;
use crate::response::ActionResult;
use crate::state::AppState;

/// Status and body of an action response.
pub type ActionReply = (StatusCode, Json<ActionResult>);

fn succeeded(message: Message, locale: Locale) -> ActionReply {
    (StatusCode::OK, Json(ActionResult::ok(message.text(locale))))
}

fn failed(status: StatusCode, message: Message, locale: Locale) -> ActionReply {
    (status, Json(ActionResult::failed(message.text(locale))))
}

fn not_authenticated(locale: Locale) -> ActionReply {
    failed(StatusCode::UNAUTHORIZED, Message::NotAuthenticated, locale)
}

fn rejected(message: Message, locale: Locale) -> ActionReply {
    failed(StatusCode::UNPROCESSABLE_ENTITY, message, locale)
}

/// Resolve the session and the submitted body, in that order.
fn admit<T>(
    session: Option<AuthUser>,
    body: Result<Json<T>, JsonRejection>,
    locale: Locale,
) -> Result<(AuthUser, T), ActionReply> {
    let user = session.ok_or_else(|| not_authenticated(locale))?;
    match body {
        Ok(Json(form)) => Ok((user, form)),
        Err(rejection) => {
            tracing::debug!(user_id = %user.user_id, error = %rejection, "Unreadable action body");
            Err(rejected(Message::InvalidSubmission, locale))
        }
    }
}

/// POST /{locale}/actions/profile
///
/// Validate and overwrite the member's profile. Fields that do not belong to
/// the stored role are cleared.
pub async fn update_profile(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
    body: Result<Json<ProfileForm>, JsonRejection>,
) -> ActionReply {
    let (user, form) = match admit(session, body, locale) {
        Ok(admitted) => admitted,
        Err(reply) => return reply,
    };

    let profile = match ProfileRepo::find_by_user_id(&state.pool, user.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return not_authenticated(locale),
        Err(e) => {
            tracing::error!(user_id = %user.user_id, error = %e, "Failed to load profile");
            return failed(StatusCode::INTERNAL_SERVER_ERROR, Message::ProfileUpdateFailed, locale);
        }
    };

    let changes = match form.into_changes(profile.role()) {
        Ok(changes) => changes,
        Err(message) => return rejected(message, locale),
    };

    match ProfileRepo::update(&state.pool, user.user_id, &changes).await {
        Ok(Some(_)) => {
            tracing::info!(user_id = %user.user_id, "Profile updated");
            succeeded(Message::ProfileUpdated, locale)
        }
        Ok(None) => not_authenticated(locale),
        Err(e) => {
            tracing::error!(user_id = %user.user_id, error = %e, "Failed to update profile");
            failed(StatusCode::INTERNAL_SERVER_ERROR, Message::ProfileUpdateFailed, locale)
        }
    }
}

/// POST /{locale}/actions/role
///
/// Choose a role during onboarding. A role that is already set is kept.
pub async fn select_role(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
    body: Result<Json<RoleSelectionForm>, JsonRejection>,
) -> ActionReply {
    let (user, form) = match admit(session, body, locale) {
        Ok(admitted) => admitted,
        Err(reply) => return reply,
    };
    let role = match form.check() {
        Ok(role) => role,
        Err(message) => return rejected(message, locale),
    };

    match ProfileRepo::set_role_if_unset(&state.pool, user.user_id, role).await {
        Ok(Some(_)) => {
            tracing::info!(user_id = %user.user_id, role = role.as_str(), "Role selected");
            succeeded(Message::RoleSelected, locale)
        }
        Ok(None) => match ProfileRepo::find_by_user_id(&state.pool, user.user_id).await {
            Ok(Some(_)) => rejected(Message::RoleAlreadySet, locale),
            Ok(None) => not_authenticated(locale),
            Err(e) => {
                tracing::error!(user_id = %user.user_id, error = %e, "Failed to load profile");
                failed(StatusCode::INTERNAL_SERVER_ERROR, Message::ProfileUpdateFailed, locale)
            }
        },
        Err(e) => {
            tracing::error!(user_id = %user.user_id, error = %e, "Failed to set role");
            failed(StatusCode::INTERNAL_SERVER_ERROR, Message::ProfileUpdateFailed, locale)
        }
    }
}

/// POST /{locale}/actions/password
///
/// Replace the password after verifying the current one, then revoke every
/// refresh session of the account.
pub async fn change_password(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
    body: Result<Json<PasswordChangeForm>, JsonRejection>,
) -> ActionReply {
    let (user, form) = match admit(session, body, locale) {
        Ok(admitted) => admitted,
        Err(reply) => return reply,
    };
    if let Err(message) = form.check() {
        return rejected(message, locale);
    }

    let store_failure = |error: String, what: &str| {
        tracing::error!(user_id = %user.user_id, error = %error, "{what}");
        failed(StatusCode::INTERNAL_SERVER_ERROR, Message::PasswordChangeFailed, locale)
    };

    let account = match UserRepo::find_by_id(&state.pool, user.user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return not_authenticated(locale),
        Err(e) => return store_failure(e.to_string(), "Failed to load account"),
    };

    match verify_password(&form.current_password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => return rejected(Message::CurrentPasswordIncorrect, locale),
        Err(e) => return store_failure(e.to_string(), "Stored password hash is unreadable"),
    }

    let new_hash = match hash_password(&form.new_password) {
        Ok(hash) => hash,
        Err(e) => return store_failure(e.to_string(), "Password hashing failed"),
    };

    match UserRepo::update_password(&state.pool, user.user_id, &new_hash).await {
        Ok(true) => {}
        Ok(false) => return not_authenticated(locale),
        Err(e) => return store_failure(e.to_string(), "Failed to update password"),
    }

    match SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await {
        Ok(revoked) => {
            tracing::info!(user_id = %user.user_id, revoked, "Password changed");
            succeeded(Message::PasswordChanged, locale)
        }
        Err(e) => store_failure(e.to_string(), "Failed to revoke sessions after password change"),
    }
}

/// POST /{locale}/actions/delete-account
///
/// Delete the account once the member typed the confirmation text. The
/// profile and sessions go with it, and the session cookie is cleared.
pub async fn delete_account(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Session(session): Session,
    body: Result<Json<DeleteAccountForm>, JsonRejection>,
) -> Response {
    let (user, form) = match admit(session, body, locale) {
        Ok(admitted) => admitted,
        Err(reply) => return reply.into_response(),
    };
    if let Err(message) = form.check() {
        return rejected(message, locale).into_response();
    }

    match UserRepo::delete(&state.pool, user.user_id).await {
        Ok(true) => {
            tracing::info!(user_id = %user.user_id, "Account deleted");
            let cookie = clear_session_cookie(state.config.secure_cookies);
            ([(SET_COOKIE, cookie)], succeeded(Message::AccountDeleted, locale)).into_response()
        }
        Ok(false) => not_authenticated(locale).into_response(),
        Err(e) => {
            tracing::error!(user_id = %user.user_id, error = %e, "Failed to delete account");
            failed(StatusCode::INTERNAL_SERVER_ERROR, Message::AccountDeleteFailed, locale)
                .into_response()
        }
    }
}
