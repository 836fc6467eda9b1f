//! HTTP-level tests for the member area and member actions.

mod common;

use atelier_api::auth::password::verify_password;
use atelier_db::repositories::{ProfileRepo, UserRepo};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use common::{
    body_json, build_content_app, build_test_app, get, get_auth, get_with_cookie, post_json,
    post_json_auth, post_raw_auth, token_for, StubCms,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PASSWORD: &str = "correct-horse";

fn app(pool: &PgPool) -> axum::Router {
    build_test_app(pool.clone(), StubCms::empty())
}

/// Sign up through the API and return `(user_id, access_token)`.
async fn member(pool: &PgPool, email: &str, role: &str) -> (Uuid, String) {
    let body = json!({
        "email": email,
        "password": PASSWORD,
        "full_name": "Amina Diallo",
        "role": role,
    });
    let response = post_json(app(pool), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["user"]["id"].as_str().unwrap().parse().unwrap();
    (id, json["access_token"].as_str().unwrap().to_string())
}

fn profile_submission() -> Value {
    json!({
        "full_name": "Amina Diallo",
        "bio": "Building tools for coastal co-ops.",
        "languages": ["fr", "en"],
        "visibility": "public",
        "linkedin_url": "https://www.linkedin.com/in/amina",
        "company_name": "Havre",
        "stage": "mvp",
        "expertise": ["fundraising"],
    })
}

// ---------------------------------------------------------------------------
// Gated pages
// ---------------------------------------------------------------------------

/// Without a session, member pages redirect to the locale's login page.
#[tokio::test]
async fn test_member_pages_redirect_to_login() {
    for (path, target) in [
        ("/en/profile", "/en/login"),
        ("/fr/settings", "/fr/login"),
        ("/fr/dashboard", "/fr/login"),
    ] {
        let response = get(build_content_app(StubCms::empty()), path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.headers()[LOCATION], target);
    }
}

/// A token that does not verify counts as signed out.
#[tokio::test]
async fn test_invalid_token_redirects_to_login() {
    let response = get_auth(build_content_app(StubCms::empty()), "/en/profile", "garbage").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_page_shows_role_sections(pool: PgPool) {
    let (_, token) = member(&pool, "e@example.org", "entrepreneur").await;

    let response = get_with_cookie(app(&pool), "/fr/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["meta"]["title"], "Mon profil");
    assert_eq!(json["data"]["sections"], json!({ "company": true, "mentoring": false }));
    assert_eq!(json["data"]["profile"]["full_name"], "Amina Diallo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_page_shows_email(pool: PgPool) {
    let (_, token) = member(&pool, "settings@example.org", "").await;

    let response = get_auth(app(&pool), "/en/settings", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "settings@example.org");
    assert_eq!(json["data"]["visibility"], "members");
    assert_eq!(json["data"]["delete_confirmation"], "DELETE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_follows_role(pool: PgPool) {
    let (_, onboarding) = member(&pool, "o@example.org", "").await;
    let (_, mentor) = member(&pool, "m@example.org", "mentor").await;

    let json = body_json(get_auth(app(&pool), "/en/dashboard", &onboarding).await).await;
    assert_eq!(json["data"]["kind"], "onboarding");
    assert_eq!(json["data"]["role_choices"].as_array().unwrap().len(), 3);

    let json = body_json(get_auth(app(&pool), "/en/dashboard", &mentor).await).await;
    assert_eq!(json["data"]["kind"], "mentor");
}

/// A valid token for an account that no longer exists redirects.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_for_missing_account_redirects(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let response = get_auth(app(&pool), "/en/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// ---------------------------------------------------------------------------
// updateProfile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_actions_require_session() {
    let response = post_json(
        build_content_app(StubCms::empty()),
        "/fr/actions/profile",
        profile_submission(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["error"],
        "Vous devez être connecté pour effectuer cette action."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_persists(pool: PgPool) {
    let (id, token) = member(&pool, "p@example.org", "entrepreneur").await;

    let response =
        post_json_auth(app(&pool), "/en/actions/profile", profile_submission(), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "message": "Profile updated." })
    );

    let profile = ProfileRepo::find_by_user_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Building tools for coastal co-ops."));
    assert_eq!(profile.languages, vec!["fr".to_string(), "en".to_string()]);
    assert_eq!(profile.visibility, "public");
    assert_eq!(profile.company_name.as_deref(), Some("Havre"));
    assert_eq!(profile.stage.as_deref(), Some("mvp"));
    // Mentoring fields do not apply to entrepreneurs.
    assert!(profile.expertise.is_empty());
}

/// An over-long bio is rejected and nothing is written.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_rejects_long_bio(pool: PgPool) {
    let (id, token) = member(&pool, "bio@example.org", "mentor").await;
    let mut submission = profile_submission();
    submission["bio"] = json!("x".repeat(501));
    submission["full_name"] = json!("Changed Name");

    let response = post_json_auth(app(&pool), "/en/actions/profile", submission, &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Bio must be 500 characters or fewer.");

    let profile = ProfileRepo::find_by_user_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(profile.full_name, "Amina Diallo");
    assert_eq!(profile.bio, None);
}

/// An empty language selection has its own message.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_requires_language(pool: PgPool) {
    let (_, token) = member(&pool, "lang@example.org", "").await;
    let mut submission = profile_submission();
    submission["languages"] = json!([]);

    let response = post_json_auth(app(&pool), "/fr/actions/profile", submission, &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"],
        "Sélectionnez au moins une langue."
    );
}

/// The first failing field in form order decides the message.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_reports_first_error(pool: PgPool) {
    let (_, token) = member(&pool, "order@example.org", "entrepreneur").await;
    let mut submission = profile_submission();
    submission["full_name"] = json!("   ");
    submission["stage"] = json!("unicorn");

    let response = post_json_auth(app(&pool), "/en/actions/profile", submission, &token).await;
    assert_eq!(body_json(response).await["error"], "Name is required.");
}

/// A body that is not a profile submission still yields a result object.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_malformed_body(pool: PgPool) {
    let (_, token) = member(&pool, "raw@example.org", "").await;

    let response = post_raw_auth(app(&pool), "/en/actions/profile", "{not json", &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "The submitted form could not be read.");
}

// ---------------------------------------------------------------------------
// selectRole
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_select_role_once(pool: PgPool) {
    let (id, token) = member(&pool, "role@example.org", "").await;

    let response = post_json_auth(
        app(&pool),
        "/en/actions/role",
        json!({ "role": "mentor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Welcome aboard!");

    let response = post_json_auth(
        app(&pool),
        "/en/actions/role",
        json!({ "role": "entrepreneur" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"],
        "Your role has already been chosen."
    );

    let profile = ProfileRepo::find_by_user_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(profile.role.as_deref(), Some("mentor"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_select_role_rejects_unknown_role(pool: PgPool) {
    let (_, token) = member(&pool, "badrole@example.org", "").await;

    let response = post_json_auth(
        app(&pool),
        "/en/actions/role",
        json!({ "role": "admin" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "Please choose a valid role.");
}

// ---------------------------------------------------------------------------
// changePassword
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password_wrong_current(pool: PgPool) {
    let (id, token) = member(&pool, "pw@example.org", "").await;
    let before = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    let response = post_json_auth(
        app(&pool),
        "/en/actions/password",
        json!({
            "current_password": "not-my-password",
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-pass",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"],
        "Your current password is incorrect."
    );

    let after = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(before.password_hash, after.password_hash);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password_mismatch(pool: PgPool) {
    let (_, token) = member(&pool, "mismatch@example.org", "").await;

    let response = post_json_auth(
        app(&pool),
        "/en/actions/password",
        json!({
            "current_password": PASSWORD,
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-typo",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "Passwords do not match.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password_success(pool: PgPool) {
    let (id, token) = member(&pool, "change@example.org", "").await;

    let response = post_json_auth(
        app(&pool),
        "/en/actions/password",
        json!({
            "current_password": PASSWORD,
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-pass",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let account = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(verify_password("brand-new-pass", &account.password_hash).unwrap());

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_sessions WHERE user_id = $1 AND is_revoked = false",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(active, 0);
}

// ---------------------------------------------------------------------------
// deleteAccount
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_account_requires_confirmation(pool: PgPool) {
    let (id, token) = member(&pool, "keep@example.org", "").await;

    let response = post_json_auth(
        app(&pool),
        "/en/actions/delete-account",
        json!({ "confirmation": "delete" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "Type DELETE to confirm.");
    assert!(UserRepo::find_by_id(&pool, id).await.unwrap().is_some());
}

/// Deleting the account removes the profile and sessions with it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_account_cascades(pool: PgPool) {
    let (id, token) = member(&pool, "gone@example.org", "mentor").await;

    let response = post_json_auth(
        app(&pool),
        "/en/actions/delete-account",
        json!({ "confirmation": "DELETE" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Your account has been deleted.");

    assert!(UserRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(ProfileRepo::find_by_user_id(&pool, id).await.unwrap().is_none());

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE user_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sessions, 0);

    // The still-valid token now belongs to nobody.
    let response = post_json_auth(
        app(&pool),
        "/en/actions/profile",
        profile_submission(),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
