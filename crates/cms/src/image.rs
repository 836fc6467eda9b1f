//! CDN URLs for CMS image assets.
//!
//! Image references have the shape `image-<assetId>-<width>x<height>-<ext>`;
//! the CDN serves them at
//! `https://cdn.sanity.io/images/<project>/<dataset>/<assetId>-<w>x<h>.<ext>`.

use crate::config::CmsConfig;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Builds image URLs for one project and dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn from_config(config: &CmsConfig) -> Self {
        Self::new(config.project_id.clone(), config.dataset.clone())
    }

    /// URL for `asset_ref`, optionally resized to `width` pixels.
    ///
    /// Returns `None` when the reference is malformed.
    pub fn url(&self, asset_ref: &str, width: Option<u32>) -> Option<String> {
        let (id, dimensions, ext) = parse_ref(asset_ref)?;
        let mut url = format!(
            "{CDN_BASE}/{}/{}/{id}-{dimensions}.{ext}",
            self.project_id, self.dataset
        );
        if let Some(w) = width {
            url.push_str(&format!("?w={w}&auto=format"));
        }
        Some(url)
    }
}

/// Split `image-<id>-<WxH>-<ext>` into its parts.
fn parse_ref(asset_ref: &str) -> Option<(&str, &str, &str)> {
    let rest = asset_ref.strip_prefix("image-")?;
    let mut parts = rest.rsplitn(3, '-');
    let ext = parts.next()?;
    let dimensions = parts.next()?;
    let id = parts.next()?;

    let (w, h) = dimensions.split_once('x')?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
        return None;
    }
    Some((id, dimensions, ext))
}
