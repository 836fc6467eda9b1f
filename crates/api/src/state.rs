use std::sync::Arc;

use atelier_cms::image::ImageUrlBuilder;
use atelier_cms::ContentSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration (JWT secrets, default locale, cookie policy).
    pub config: Arc<ServerConfig>,
    /// Source of marketing content.
    pub cms: Arc<dyn ContentSource>,
    /// CDN URL builder for CMS image references.
    pub images: ImageUrlBuilder,
}
