use crate::ports::outbound::CrawlError;
use crate::scanning::domain::Credential;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// ServiceClient port - an authenticated handle to one GCP service family
///
/// Paths are resolved against the family's REST base URL unless they are
/// absolute `https://` URLs.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Name of the service family this client talks to (e.g. "compute")
    fn service_family(&self) -> &str;

    /// Issues an authenticated GET and decodes the JSON body
    ///
    /// # Arguments
    /// * `path` - Path relative to the family base URL, or an absolute URL
    /// * `query` - Query parameters, URL-encoded by the implementation
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Value, CrawlError>;

    /// Issues an authenticated POST with a JSON body and decodes the JSON response
    async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> std::result::Result<Value, CrawlError>;
}

/// ClientFactory port - builds authenticated clients by service family name
pub trait ClientFactory: Send + Sync {
    /// Creates a client for the given family using the credential's authority
    ///
    /// # Errors
    /// Returns `ScanError::UnsupportedServiceFamily` if the family name is unknown
    fn client_for(
        &self,
        service_family: &str,
        credential: &Credential,
    ) -> Result<Box<dyn ServiceClient>>;
}
