use crate::ports::outbound::{CrawlError, ResourceCrawler, ServiceClient};
use crate::scanning::domain::CrawlerConfig;
use async_trait::async_trait;
use serde_json::Value;

/// Lists the project's repositories in Google Container Registry
///
/// The registry catalog is global, so entries are filtered by the
/// `<project>/` repository prefix.
pub struct GkeImagesCrawler;

#[async_trait]
impl ResourceCrawler for GkeImagesCrawler {
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        _config: &CrawlerConfig,
    ) -> Result<Vec<Value>, CrawlError> {
        let catalog = client.get_json("_catalog", &[]).await?;
        let prefix = format!("{}/", project_id);
        let repositories = match catalog.get("repositories") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(repositories)) => repositories,
            Some(_) => return Err(CrawlError::malformed("registry catalog is not a list")),
        };
        Ok(repositories
            .iter()
            .filter(|repository| {
                repository
                    .as_str()
                    .map(|name| name.starts_with(&prefix))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}
