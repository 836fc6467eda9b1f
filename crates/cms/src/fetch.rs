//! Page data-fetchers.
//!
//! Each fetcher issues one query and returns plain JSON records. A query
//! that matches nothing yields an empty list (or `None` for single-record
//! fetchers), which pages render as their empty state.

use atelier_core::locale::Locale;
use serde_json::{json, Value};

use crate::client::{CmsError, ContentSource, QueryParams};
use crate::queries;

/// Sections of the home page, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeContent {
    pub ventures: Vec<Value>,
    pub events: Vec<Value>,
    pub posts: Vec<Value>,
}

/// Interpret a query result as a list of records.
///
/// `null` means no documents matched. Non-object items are dropped.
fn into_records(value: Value) -> Result<Vec<Value>, CmsError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.into_iter().filter(Value::is_object).collect()),
        other => Err(CmsError::Decode(format!(
            "expected a list of documents, got {}",
            kind(&other)
        ))),
    }
}

/// Interpret a query result as at most one record.
fn into_record(value: Value) -> Result<Option<Value>, CmsError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => Ok(Some(value)),
        other => Err(CmsError::Decode(format!(
            "expected a document, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn slug_params(slug: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("slug".to_string(), json!(slug));
    params
}

async fn fetch_list(source: &dyn ContentSource, groq: String) -> Result<Vec<Value>, CmsError> {
    let result = source.query(&groq, &QueryParams::new()).await?;
    into_records(result)
}

pub async fn fetch_ventures(source: &dyn ContentSource) -> Result<Vec<Value>, CmsError> {
    fetch_list(source, queries::ventures()).await
}

pub async fn fetch_venture(
    source: &dyn ContentSource,
    slug: &str,
) -> Result<Option<Value>, CmsError> {
    let result = source
        .query(&queries::venture_by_slug(), &slug_params(slug))
        .await?;
    into_record(result)
}

pub async fn fetch_case_studies(source: &dyn ContentSource) -> Result<Vec<Value>, CmsError> {
    fetch_list(source, queries::case_studies()).await
}

pub async fn fetch_programs(source: &dyn ContentSource) -> Result<Vec<Value>, CmsError> {
    fetch_list(source, queries::programs()).await
}

pub async fn fetch_events(source: &dyn ContentSource) -> Result<Vec<Value>, CmsError> {
    fetch_list(source, queries::upcoming_events()).await
}

pub async fn fetch_team(source: &dyn ContentSource) -> Result<Vec<Value>, CmsError> {
    fetch_list(source, queries::team()).await
}

pub async fn fetch_posts(source: &dyn ContentSource) -> Result<Vec<Value>, CmsError> {
    fetch_list(source, queries::posts()).await
}

/// One post by slug, with its body in `locale`.
pub async fn fetch_post(
    source: &dyn ContentSource,
    slug: &str,
    locale: Locale,
) -> Result<Option<Value>, CmsError> {
    let result = source
        .query(&queries::post_by_slug(locale), &slug_params(slug))
        .await?;
    into_record(result)
}

/// Home page sections in a single composite query.
pub async fn fetch_home(source: &dyn ContentSource) -> Result<HomeContent, CmsError> {
    let mut result = source.query(&queries::home(), &QueryParams::new()).await?;
    if result.is_null() {
        return Ok(HomeContent::default());
    }
    if !result.is_object() {
        return Err(CmsError::Decode(format!(
            "expected home sections, got {}",
            kind(&result)
        )));
    }

    Ok(HomeContent {
        ventures: into_records(result["ventures"].take())?,
        events: into_records(result["events"].take())?,
        posts: into_records(result["posts"].take())?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;

    /// Returns a canned result and remembers the last query.
    struct Canned {
        result: Value,
        seen: Mutex<Vec<(String, QueryParams)>>,
    }

    impl Canned {
        fn new(result: Value) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContentSource for Canned {
        async fn query(&self, groq: &str, params: &QueryParams) -> Result<Value, CmsError> {
            self.seen
                .lock()
                .unwrap()
                .push((groq.to_string(), params.clone()));
            Ok(self.result.clone())
        }
    }

    #[tokio::test]
    async fn empty_and_null_results_are_empty_lists() {
        let source = Canned::new(json!([]));
        assert!(fetch_ventures(&source).await.unwrap().is_empty());

        let source = Canned::new(Value::Null);
        assert!(fetch_posts(&source).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_keeps_documents_in_order() {
        let source = Canned::new(json!([{ "titleEn": "B" }, "junk", { "titleEn": "A" }]));
        let records = fetch_programs(&source).await.unwrap();
        assert_eq!(records, vec![json!({ "titleEn": "B" }), json!({ "titleEn": "A" })]);
    }

    #[tokio::test]
    async fn scalar_result_is_a_decode_error() {
        let source = Canned::new(json!(42));
        assert_matches!(fetch_events(&source).await, Err(CmsError::Decode(_)));
    }

    #[tokio::test]
    async fn detail_fetch_passes_slug_parameter() {
        let source = Canned::new(json!({ "titleEn": "Harbour" }));
        let venture = fetch_venture(&source, "harbour").await.unwrap();
        assert_eq!(venture, Some(json!({ "titleEn": "Harbour" })));

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1.get("slug"), Some(&json!("harbour")));
    }

    #[tokio::test]
    async fn missing_detail_is_none() {
        let source = Canned::new(Value::Null);
        assert_eq!(fetch_post(&source, "nope", Locale::Fr).await.unwrap(), None);
    }

    #[tokio::test]
    async fn home_splits_composite_result() {
        let source = Canned::new(json!({
            "ventures": [{ "titleEn": "Harbour" }],
            "events": null,
            "posts": [{ "titleEn": "Hello" }, { "titleEn": "Bonjour" }],
        }));
        let home = fetch_home(&source).await.unwrap();
        assert_eq!(home.ventures.len(), 1);
        assert!(home.events.is_empty());
        assert_eq!(home.posts.len(), 2);
        assert_eq!(source.seen.lock().unwrap().len(), 1);
    }
}
