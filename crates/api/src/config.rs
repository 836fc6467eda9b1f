use atelier_cms::CmsConfig;
use atelier_core::locale::Locale;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Locale used when `Accept-Language` names no supported language.
    pub default_locale: Locale,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Content CMS connection settings.
    pub cms: CmsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DEFAULT_LOCALE`       | `en`                       |
    /// | `SECURE_COOKIES`       | `true`                     |
    ///
    /// JWT and CMS settings are read by [`JwtConfig::from_env`] and
    /// [`CmsConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_locale: Locale = std::env::var("DEFAULT_LOCALE")
            .unwrap_or_else(|_| "en".into())
            .parse()
            .expect("DEFAULT_LOCALE must be `en` or `fr`");

        let secure_cookies = std::env::var("SECURE_COOKIES")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let jwt = JwtConfig::from_env();
        let cms = CmsConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_locale,
            secure_cookies,
            jwt,
            cms,
        }
    }
}
