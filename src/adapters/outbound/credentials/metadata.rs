use crate::adapters::outbound::network::parse_scopes;
use crate::ports::outbound::CredentialSource;
use crate::scanning::domain::{Credential, Identity};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Metadata server path of the instance's default service account
pub const DEFAULT_METADATA_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/";

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

/// MetadataServerSource adapter - the default service account of a GCE/GKE instance
pub struct MetadataServerSource {
    http: reqwest::Client,
    base_url: String,
}

impl MetadataServerSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_METADATA_URL)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, item: &str) -> Result<String> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, item))
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "metadata server returned status code {} for {}",
                response.status(),
                item
            );
        }
        Ok(response.text().await?)
    }

    async fn load(&self) -> Result<Identity> {
        let email = self.fetch("email").await?.trim().to_string();
        let token: MetadataToken = serde_json::from_str(&self.fetch("token").await?)?;
        let scopes = parse_scopes(Some(&self.fetch("scopes").await?));
        Ok(Identity::seed(
            email,
            Credential::new(token.access_token, scopes),
        ))
    }
}

#[async_trait]
impl CredentialSource for MetadataServerSource {
    fn describe(&self) -> String {
        "instance metadata".to_string()
    }

    async fn load_identities(&self) -> Vec<Identity> {
        match self.load().await {
            Ok(identity) => vec![identity],
            Err(e) => {
                tracing::error!(error = %e, "Failed to retrieve credentials from metadata");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_metadata_server_yields_nothing() {
        let source = MetadataServerSource::with_base_url(
            reqwest::Client::new(),
            "http://127.0.0.1:9/computeMetadata/v1/",
        );
        assert!(source.load_identities().await.is_empty());
    }

    #[test]
    fn test_describe() {
        let source = MetadataServerSource::new(reqwest::Client::new());
        assert_eq!(source.describe(), "instance metadata");
    }
}
