use crate::ports::outbound::{ClientFactory, CrawlError, ServiceClient};
use crate::scanning::domain::Credential;
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Service family used to mint impersonated tokens
pub const IAM_CREDENTIALS: &str = "iamcredentials";

/// Service family serving project listings and IAM policies
pub const CLOUD_RESOURCE_MANAGER: &str = "cloudresourcemanager";

/// Request timeout for every GCP API call
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum length of an error body echoed into a CrawlError
const MAX_ERROR_MESSAGE_LEN: usize = 300;

/// Service family → REST base URL
const SERVICE_BASE_URLS: &[(&str, &str)] = &[
    ("appengine", "https://appengine.googleapis.com/v1/"),
    ("bigquery", "https://bigquery.googleapis.com/bigquery/v2/"),
    ("bigtableadmin", "https://bigtableadmin.googleapis.com/v2/"),
    ("cloudfunctions", "https://cloudfunctions.googleapis.com/v1/"),
    ("cloudkms", "https://cloudkms.googleapis.com/v1/"),
    (
        CLOUD_RESOURCE_MANAGER,
        "https://cloudresourcemanager.googleapis.com/v1/",
    ),
    ("compute", "https://compute.googleapis.com/compute/v1/"),
    ("container", "https://container.googleapis.com/v1/"),
    ("containerregistry", "https://gcr.io/v2/"),
    ("dns", "https://dns.googleapis.com/dns/v1/"),
    ("file", "https://file.googleapis.com/v1/"),
    ("iam", "https://iam.googleapis.com/v1/"),
    (IAM_CREDENTIALS, "https://iamcredentials.googleapis.com/v1/"),
    ("pubsub", "https://pubsub.googleapis.com/v1/"),
    ("servicemanagement", "https://servicemanagement.googleapis.com/v1/"),
    ("serviceusage", "https://serviceusage.googleapis.com/v1/"),
    ("sourcerepo", "https://sourcerepo.googleapis.com/v1/"),
    ("spanner", "https://spanner.googleapis.com/v1/"),
    ("sqladmin", "https://sqladmin.googleapis.com/sql/v1beta4/"),
    ("storage", "https://storage.googleapis.com/storage/v1/"),
];

/// Builds the HTTP client shared by every network adapter
pub fn build_http_client() -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("gcp-scanner/{}", version);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// REST base URL of a service family
pub fn base_url_for(service_family: &str) -> Option<&'static str> {
    SERVICE_BASE_URLS
        .iter()
        .find(|(family, _)| *family == service_family)
        .map(|(_, url)| *url)
}

/// Appends URL-encoded query parameters to a URL
pub fn with_query(url: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let encoded: Vec<String> = query
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, encoded.join("&"))
}

/// Maps an HTTP status and body to the crawl result
///
/// 401/403 become `Unauthorized`, other failures `Unavailable`, and a
/// successful body that is not JSON `Malformed`. An empty successful body
/// decodes as `{}`.
pub fn interpret_response(
    status: u16,
    body: &str,
) -> std::result::Result<Value, CrawlError> {
    if status == 401 || status == 403 {
        return Err(CrawlError::Unauthorized {
            status,
            message: error_message(body),
        });
    }
    if !(200..300).contains(&status) {
        return Err(CrawlError::unavailable(format!(
            "HTTP {}: {}",
            status,
            error_message(body)
        )));
    }
    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body).map_err(|e| CrawlError::malformed(e.to_string()))
}

/// Extracts `error.message` from a Google API error body, or a truncated raw body
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    if let Some(message) = parsed
        .as_ref()
        .and_then(|value| value.pointer("/error/message"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }
    body.chars().take(MAX_ERROR_MESSAGE_LEN).collect()
}

/// RestServiceClient adapter - bearer-authenticated JSON calls to one service family
pub struct RestServiceClient {
    http: reqwest::Client,
    service_family: String,
    base_url: &'static str,
    access_token: String,
}

impl RestServiceClient {
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<Value, CrawlError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| CrawlError::unavailable(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CrawlError::unavailable(e.to_string()))?;
        interpret_response(status, &body)
    }
}

#[async_trait]
impl ServiceClient for RestServiceClient {
    fn service_family(&self) -> &str {
        &self.service_family
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Value, CrawlError> {
        let url = with_query(&self.resolve(path), query);
        self.send(self.http.get(url)).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> std::result::Result<Value, CrawlError> {
        let url = self.resolve(path);
        self.send(self.http.post(url).json(body)).await
    }
}

/// RestClientFactory adapter - builds RestServiceClients sharing one HTTP client
#[derive(Clone)]
pub struct RestClientFactory {
    http: reqwest::Client,
}

impl RestClientFactory {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl ClientFactory for RestClientFactory {
    fn client_for(
        &self,
        service_family: &str,
        credential: &Credential,
    ) -> Result<Box<dyn ServiceClient>> {
        let base_url =
            base_url_for(service_family).ok_or_else(|| ScanError::UnsupportedServiceFamily {
                family: service_family.to_string(),
            })?;
        Ok(Box::new(RestServiceClient {
            http: self.http.clone(),
            service_family: service_family.to_string(),
            base_url,
            access_token: credential.access_token().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanning::policies::SchemaRegistry;
    use serde_json::json;

    #[test]
    fn test_every_crawled_family_has_a_base_url() {
        for resource_type in SchemaRegistry::crawl_order() {
            let family = SchemaRegistry::service_family_for(resource_type).unwrap();
            assert!(
                base_url_for(family).is_some(),
                "no base URL for {} ({})",
                family,
                resource_type
            );
        }
        assert!(base_url_for(IAM_CREDENTIALS).is_some());
    }

    #[test]
    fn test_client_for_unknown_family() {
        let factory = RestClientFactory::new(build_http_client().unwrap());
        let credential = Credential::new("token", vec![]);

        let err = factory.client_for("mainframe", &credential).err().unwrap();
        let scan_error = err.downcast_ref::<ScanError>().unwrap();
        assert!(matches!(
            scan_error,
            ScanError::UnsupportedServiceFamily { family } if family == "mainframe"
        ));
    }

    #[test]
    fn test_client_for_known_family() {
        let factory = RestClientFactory::new(build_http_client().unwrap());
        let credential = Credential::new("token", vec![]);

        let client = factory.client_for("compute", &credential).unwrap();
        assert_eq!(client.service_family(), "compute");
    }

    #[test]
    fn test_with_query_encodes_values() {
        assert_eq!(with_query("https://x/b", &[]), "https://x/b");
        assert_eq!(
            with_query("https://x/services", &[("filter", "state:ENABLED"), ("pageToken", "a b")]),
            "https://x/services?filter=state%3AENABLED&pageToken=a%20b"
        );
        assert_eq!(
            with_query("https://x/o?fields=items", &[("pageToken", "t")]),
            "https://x/o?fields=items&pageToken=t"
        );
    }

    #[test]
    fn test_interpret_response_success() {
        let value = interpret_response(200, r#"{"items": [1, 2]}"#).unwrap();
        assert_eq!(value, json!({"items": [1, 2]}));
        assert_eq!(interpret_response(204, "").unwrap(), json!({}));
    }

    #[test]
    fn test_interpret_response_unauthorized() {
        let body = r#"{"error": {"code": 403, "message": "Permission denied on resource"}}"#;
        let err = interpret_response(403, body).unwrap_err();
        assert_eq!(
            err,
            CrawlError::Unauthorized {
                status: 403,
                message: "Permission denied on resource".to_string()
            }
        );
    }

    #[test]
    fn test_interpret_response_other_failures() {
        let err = interpret_response(503, "backend unavailable").unwrap_err();
        assert_eq!(
            err,
            CrawlError::unavailable("HTTP 503: backend unavailable")
        );

        let err = interpret_response(200, "<html>").unwrap_err();
        assert!(matches!(err, CrawlError::Malformed { .. }));
    }
}
