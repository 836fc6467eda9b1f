#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use atelier_api::auth::jwt::{generate_access_token, JwtConfig};
use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_cms::image::ImageUrlBuilder;
use atelier_cms::{CmsConfig, CmsError, ContentSource, QueryParams};
use atelier_core::locale::Locale;
use atelier_core::types::UserId;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        default_locale: Locale::En,
        secure_cookies: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        cms: CmsConfig {
            project_id: "test".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            token: None,
            use_cdn: false,
            api_host: Some("http://127.0.0.1:9".to_string()),
        },
    }
}

// ---------------------------------------------------------------------------
// CMS stub
// ---------------------------------------------------------------------------

/// Answers each query with the first canned result whose needle appears in
/// the query text, or `null` when none does.
pub struct StubCms {
    answers: Vec<(&'static str, Value)>,
    fail: bool,
}

impl StubCms {
    /// Nothing published.
    pub fn empty() -> Self {
        Self {
            answers: Vec::new(),
            fail: false,
        }
    }

    /// Add a canned result for queries containing `needle`.
    pub fn with(mut self, needle: &'static str, result: Value) -> Self {
        self.answers.push((needle, result));
        self
    }

    /// Every query fails as if the CMS were down.
    pub fn failing() -> Self {
        Self {
            answers: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ContentSource for StubCms {
    async fn query(&self, groq: &str, _params: &QueryParams) -> Result<Value, CmsError> {
        if self.fail {
            return Err(CmsError::Api {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self
            .answers
            .iter()
            .find(|(needle, _)| groq.contains(needle))
            .map(|(_, result)| result.clone())
            .unwrap_or(Value::Null))
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool, cms: StubCms) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cms: Arc::new(cms),
        images: ImageUrlBuilder::from_config(&config.cms),
    };
    build_app_router(state, &config)
}

/// A pool that never connects, for routes that do not touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://atelier@127.0.0.1:1/unused")
        .expect("lazy pool should build without connecting")
}

/// App over [`lazy_pool`] serving `cms`.
pub fn build_content_app(cms: StubCms) -> Router {
    build_test_app(lazy_pool(), cms)
}

/// A valid access token for `user_id`, signed with the test secret.
pub fn token_for(user_id: UserId) -> String {
    generate_access_token(user_id, None, &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
