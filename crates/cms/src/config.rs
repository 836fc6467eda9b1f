/// Default dataset name.
const DEFAULT_DATASET: &str = "production";

/// Default dated API version.
const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Connection settings for the content CMS.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Project identifier (first label of the API host).
    pub project_id: String,
    /// Dataset to query (default: `production`).
    pub dataset: String,
    /// Dated API version (default: `2024-01-01`).
    pub api_version: String,
    /// Read token for private datasets or drafts.
    pub token: Option<String>,
    /// Query the edge-cached API host instead of the live one.
    pub use_cdn: bool,
    /// Explicit API base URL. Overrides the host derived from `project_id`.
    pub api_host: Option<String>,
}

impl CmsConfig {
    /// Load CMS settings from environment variables.
    ///
    /// | Env Var           | Required | Default      |
    /// |-------------------|----------|--------------|
    /// | `CMS_PROJECT_ID`  | **yes**  | --           |
    /// | `CMS_DATASET`     | no       | `production` |
    /// | `CMS_API_VERSION` | no       | `2024-01-01` |
    /// | `CMS_TOKEN`       | no       | --           |
    /// | `CMS_USE_CDN`     | no       | `true`       |
    /// | `CMS_API_HOST`    | no       | derived      |
    ///
    /// # Panics
    ///
    /// Panics if `CMS_PROJECT_ID` is not set or is empty.
    pub fn from_env() -> Self {
        let project_id =
            std::env::var("CMS_PROJECT_ID").expect("CMS_PROJECT_ID must be set in the environment");
        assert!(!project_id.is_empty(), "CMS_PROJECT_ID must not be empty");

        let dataset = std::env::var("CMS_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.into());
        let api_version =
            std::env::var("CMS_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.into());
        let token = std::env::var("CMS_TOKEN").ok().filter(|t| !t.is_empty());
        let use_cdn = std::env::var("CMS_USE_CDN")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        let api_host = std::env::var("CMS_API_HOST").ok().filter(|h| !h.is_empty());

        Self {
            project_id,
            dataset,
            api_version,
            token,
            use_cdn,
            api_host,
        }
    }

    /// Base URL of the HTTP API, without a trailing slash.
    ///
    /// Authenticated requests always go to the live host: the CDN does not
    /// serve token-scoped content.
    pub fn api_base(&self) -> String {
        if let Some(host) = &self.api_host {
            return host.trim_end_matches('/').to_string();
        }
        let domain = if self.use_cdn && self.token.is_none() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!("https://{}.{domain}", self.project_id)
    }

    /// Full URL of the query endpoint for the configured dataset.
    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.api_base(),
            self.api_version,
            self.dataset
        )
    }
}
