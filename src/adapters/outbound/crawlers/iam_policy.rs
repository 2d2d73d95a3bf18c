use crate::ports::outbound::{CrawlError, ResourceCrawler, ServiceClient};
use crate::scanning::domain::CrawlerConfig;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Crawls the project IAM policy and returns its bindings
pub struct IamPolicyCrawler;

#[async_trait]
impl ResourceCrawler for IamPolicyCrawler {
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        _config: &CrawlerConfig,
    ) -> Result<Vec<Value>, CrawlError> {
        let path = format!("projects/{}:getIamPolicy", project_id);
        let policy = client.post_json(&path, &json!({})).await?;
        match policy.get("bindings") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(bindings)) => Ok(bindings.clone()),
            Some(_) => Err(CrawlError::malformed("IAM policy bindings are not a list")),
        }
    }
}
