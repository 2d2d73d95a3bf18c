use crate::adapters::outbound::network::pagination::list_all;
use crate::ports::outbound::{CrawlError, ResourceCrawler, ServiceClient};
use crate::scanning::domain::CrawlerConfig;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Crawler option enabling the per-bucket object listing
pub const FETCH_FILE_NAMES: &str = "fetch_file_names";

/// Lists Cloud Storage buckets of a project
///
/// With `fetch_file_names` set, object names of every bucket are written to
/// the companion `gcs-` file instead of the main document.
pub struct StorageBucketsCrawler;

impl StorageBucketsCrawler {
    async fn list_object_names(
        client: &dyn ServiceClient,
        buckets: &[Value],
    ) -> IndexMap<String, Vec<String>> {
        let mut listing = IndexMap::new();
        for bucket in buckets
            .iter()
            .filter_map(|bucket| bucket.get("name").and_then(Value::as_str))
        {
            let path = format!("b/{}/o", urlencoding::encode(bucket));
            match list_all(client, &path, &[("fields", "items/name,nextPageToken")], "items").await {
                Ok(objects) => {
                    let names = objects
                        .iter()
                        .filter_map(|object| object.get("name").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect();
                    listing.insert(bucket.to_string(), names);
                }
                Err(e) => {
                    tracing::warn!(bucket, error = %e, "Failed to list bucket objects");
                    listing.insert(bucket.to_string(), Vec::new());
                }
            }
        }
        listing
    }

    fn write_listing(path: &Path, listing: &IndexMap<String, Vec<String>>) -> Result<()> {
        let json = serde_json::to_string_pretty(listing)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl ResourceCrawler for StorageBucketsCrawler {
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        config: &CrawlerConfig,
    ) -> std::result::Result<Vec<Value>, CrawlError> {
        let buckets = list_all(client, "b", &[("project", project_id)], "items").await?;

        if config.flag(FETCH_FILE_NAMES) {
            match config.gcs_output_path.as_deref() {
                Some(path) => {
                    let listing = Self::list_object_names(client, &buckets).await;
                    if let Err(e) = Self::write_listing(path, &listing) {
                        tracing::error!(project_id, error = %e, "Failed to save bucket object listing");
                    }
                }
                None => tracing::warn!(project_id, "No output path for bucket object listing"),
            }
        }

        Ok(buckets)
    }
}
