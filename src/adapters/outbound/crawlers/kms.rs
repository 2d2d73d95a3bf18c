use crate::adapters::outbound::network::pagination::list_all;
use crate::ports::outbound::{CrawlError, ResourceCrawler, ServiceClient};
use crate::scanning::domain::CrawlerConfig;
use async_trait::async_trait;
use serde_json::Value;

/// Lists crypto keys across every location and key ring of a project
pub struct KmsCrawler;

fn names(entries: &[Value]) -> impl Iterator<Item = &str> {
    entries
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
}

#[async_trait]
impl ResourceCrawler for KmsCrawler {
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        _config: &CrawlerConfig,
    ) -> Result<Vec<Value>, CrawlError> {
        let locations = list_all(
            client,
            &format!("projects/{}/locations", project_id),
            &[],
            "locations",
        )
        .await?;

        let mut keys = Vec::new();
        for location in names(&locations) {
            let key_rings =
                list_all(client, &format!("{}/keyRings", location), &[], "keyRings").await?;
            for key_ring in names(&key_rings) {
                keys.extend(
                    list_all(client, &format!("{}/cryptoKeys", key_ring), &[], "cryptoKeys")
                        .await?,
                );
            }
        }
        Ok(keys)
    }
}
