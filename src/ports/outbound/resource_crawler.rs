use crate::ports::outbound::ServiceClient;
use crate::scanning::domain::CrawlerConfig;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Distinguishable crawl failures
///
/// "Nothing found" is never an error: crawlers return an empty list for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    /// The credential is not allowed to read the resource (HTTP 401/403)
    #[error("unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The API could not be reached or answered with a non-auth error
    #[error("unavailable: {message}")]
    Unavailable { message: String },

    /// The API answered with something that is not the expected JSON
    #[error("malformed response: {message}")]
    Malformed { message: String },
}

impl CrawlError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// ResourceCrawler port - lists one resource type within a project
#[async_trait]
pub trait ResourceCrawler: Send + Sync {
    /// Lists the resources of this crawler's type in a project
    ///
    /// # Arguments
    /// * `project_id` - Project to crawl
    /// * `client` - Authenticated client for the type's service family
    /// * `config` - Type-specific options from the scan configuration
    ///
    /// # Returns
    /// Resource entries in API order; an empty list when there are none
    async fn crawl(
        &self,
        project_id: &str,
        client: &dyn ServiceClient,
        config: &CrawlerConfig,
    ) -> std::result::Result<Vec<Value>, CrawlError>;
}

/// CrawlerRegistry port - resource type name to crawler
pub trait CrawlerRegistry: Send + Sync {
    /// Returns the crawler registered for a resource type
    ///
    /// # Errors
    /// Returns `ScanError::UnsupportedResourceType` if nothing is registered
    fn crawler_for(&self, resource_type: &str) -> Result<Arc<dyn ResourceCrawler>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_error_display() {
        let error = CrawlError::Unauthorized {
            status: 403,
            message: "Permission denied".to_string(),
        };
        assert_eq!(error.to_string(), "unauthorized (403): Permission denied");
        assert_eq!(
            CrawlError::unavailable("timed out").to_string(),
            "unavailable: timed out"
        );
        assert_eq!(
            CrawlError::malformed("missing items").to_string(),
            "malformed response: missing items"
        );
    }
}
