use crate::ports::outbound::{CrawlError, ServiceClient};
use serde_json::Value;

/// Upper bound on followed pages for one listing
const MAX_PAGES: usize = 1000;

/// Lists every page of a GCP collection and concatenates `items_key` arrays
///
/// Follows `nextPageToken`. A page without `items_key` contributes nothing,
/// which is how GCP reports an empty collection.
pub async fn list_all(
    client: &dyn ServiceClient,
    path: &str,
    query: &[(&str, &str)],
    items_key: &str,
) -> Result<Vec<Value>, CrawlError> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let mut page_query: Vec<(&str, &str)> = query.to_vec();
        if let Some(token) = page_token.as_deref() {
            page_query.push(("pageToken", token));
        }

        let page = client.get_json(path, &page_query).await?;
        items.extend(items_of(&page, items_key)?);

        page_token = next_page_token(&page);
        if page_token.is_none() {
            return Ok(items);
        }
    }

    tracing::warn!(path, "Stopped following pages after {} pages", MAX_PAGES);
    Ok(items)
}

/// Lists a Compute Engine aggregated collection
///
/// Aggregated responses map scope names (`zones/us-central1-a`) to objects
/// carrying `items_key`; scopes with only a `warning` are empty.
pub async fn list_aggregated(
    client: &dyn ServiceClient,
    path: &str,
    items_key: &str,
) -> Result<Vec<Value>, CrawlError> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let mut page_query: Vec<(&str, &str)> = Vec::new();
        if let Some(token) = page_token.as_deref() {
            page_query.push(("pageToken", token));
        }

        let page = client.get_json(path, &page_query).await?;
        if let Some(scopes) = page.get("items").and_then(Value::as_object) {
            for scoped in scopes.values() {
                items.extend(items_of(scoped, items_key)?);
            }
        }

        page_token = next_page_token(&page);
        if page_token.is_none() {
            return Ok(items);
        }
    }

    tracing::warn!(path, "Stopped following pages after {} pages", MAX_PAGES);
    Ok(items)
}

fn items_of(page: &Value, items_key: &str) -> Result<Vec<Value>, CrawlError> {
    match page.get(items_key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values.clone()),
        Some(other) => Err(CrawlError::malformed(format!(
            "expected '{}' to be a list, got {}",
            items_key, other
        ))),
    }
}

fn next_page_token(page: &Value) -> Option<String> {
    page.get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
