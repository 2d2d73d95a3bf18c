use crate::adapters::outbound::network::pagination::{list_aggregated, list_all};
use crate::ports::outbound::{CrawlError, ResourceCrawler, ServiceClient};
use crate::scanning::domain::CrawlerConfig;
use async_trait::async_trait;
use serde_json::Value;

/// Placeholder substituted with the project id in paths and query values
const PROJECT_PLACEHOLDER: &str = "{project}";

/// How a collection is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `nextPageToken` pagination over a flat list
    Paged,
    /// Compute Engine `aggregated/` listing keyed by zone or region
    Aggregated,
}

/// Descriptor-driven crawler for APIs that list a collection under a project
#[derive(Debug, Clone, Copy)]
pub struct RestListCrawler {
    path_template: &'static str,
    items_key: &'static str,
    query: &'static [(&'static str, &'static str)],
    style: ListStyle,
}

impl RestListCrawler {
    pub const fn paged(path_template: &'static str, items_key: &'static str) -> Self {
        Self {
            path_template,
            items_key,
            query: &[],
            style: ListStyle::Paged,
        }
    }

    pub const fn aggregated(path_template: &'static str, items_key: &'static str) -> Self {
        Self {
            path_template,
            items_key,
            query: &[],
            style: ListStyle::Aggregated,
        }
    }

    pub const fn with_query(self, query: &'static [(&'static str, &'static str)]) -> Self {
        Self { query, ..self }
    }

    pub fn path_for(&self, project_id: &str) -> String {
        self.path_template.replace(PROJECT_PLACEHOLDER, project_id)
    }

    fn query_for(&self, project_id: &str) -> Vec<(&'static str, String)> {
        self.query
            .iter()
            .map(|(key, value)| (*key, value.replace(PROJECT_PLACEHOLDER, project_id)))
            .collect()
    }
}

#[async_trait]
impl ResourceCrawler for RestListCrawler {
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        _config: &CrawlerConfig,
    ) -> Result<Vec<Value>, CrawlError> {
        let path = self.path_for(project_id);
        match self.style {
            ListStyle::Paged => {
                let owned = self.query_for(project_id);
                let query: Vec<(&str, &str)> =
                    owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
                list_all(client, &path, &query, self.items_key).await
            }
            ListStyle::Aggregated => list_aggregated(client, &path, self.items_key).await,
        }
    }
}
