use atelier_cms::CmsError;
use atelier_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error returned by JSON handlers and extractors.
///
/// Renders as `{"error": <message>, "code": <CODE>}`. Anything that could
/// reveal internals (database errors, CMS failures) is logged and replaced
/// by a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The content CMS could not be queried.
    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Member-facing copy for each unique constraint in the schema.
const UNIQUE_CONSTRAINTS: &[(&str, &str)] = &[
    ("uq_users_email", "An account with this email already exists"),
    ("uq_user_sessions_refresh_token_hash", "Please sign in again"),
];

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    fn status_code_message(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => database_parts(err),
            AppError::Cms(err) => {
                tracing::error!(error = %err, "CMS query failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "CMS_ERROR",
                    "Content is temporarily unavailable".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.status_code_message();
        (status, axum::Json(ErrorBody { error, code })).into_response()
    }
}

fn internal(detail: &dyn std::fmt::Display) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => internal(msg),
    }
}

/// `RowNotFound` is a 404 and a unique violation (SQLSTATE 23505) on a
/// known constraint is a 409 with that constraint's copy. Everything else
/// is a 500.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    let duplicate = err
        .as_database_error()
        .filter(|db| db.code().as_deref() == Some("23505"))
        .and_then(|db| db.constraint())
        .and_then(unique_violation_message);
    match duplicate {
        Some(message) => (StatusCode::CONFLICT, "CONFLICT", message.to_string()),
        None => internal(err),
    }
}

fn unique_violation_message(constraint: &str) -> Option<&'static str> {
    UNIQUE_CONSTRAINTS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, message)| *message)
}
