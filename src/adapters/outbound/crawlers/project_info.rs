use crate::ports::outbound::{CrawlError, ResourceCrawler, ServiceClient};
use crate::scanning::domain::CrawlerConfig;
use async_trait::async_trait;
use serde_json::Value;

/// Fetches the project's own Resource Manager entry
pub struct ProjectInfoCrawler;

#[async_trait]
impl ResourceCrawler for ProjectInfoCrawler {
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        _config: &CrawlerConfig,
    ) -> Result<Vec<Value>, CrawlError> {
        let metadata = client
            .get_json(&format!("projects/{}", project_id), &[])
            .await?;
        Ok(vec![metadata])
    }
}
