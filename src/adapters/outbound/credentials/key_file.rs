use crate::adapters::outbound::network::{OAuthTokenClient, ServiceAccountKey};
use crate::ports::outbound::CredentialSource;
use crate::scanning::domain::Identity;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// KeyFileSource adapter - service account key files from a directory
pub struct KeyFileSource {
    key_dir: PathBuf,
    oauth: OAuthTokenClient,
}

impl KeyFileSource {
    pub fn new(key_dir: impl Into<PathBuf>, oauth: OAuthTokenClient) -> Self {
        Self {
            key_dir: key_dir.into(),
            oauth,
        }
    }

    /// Splits directory entries into `.json` candidates and everything else
    ///
    /// Both lists are sorted by file name so seeds are produced in a stable order.
    pub fn partition_key_files(key_dir: &Path) -> Result<(Vec<PathBuf>, Vec<String>)> {
        let mut candidates = Vec::new();
        let mut rejected = Vec::new();
        let entries = fs::read_dir(key_dir)
            .with_context(|| format!("Failed to list key directory {}", key_dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                candidates.push(path);
            } else if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                rejected.push(name.to_string());
            }
        }
        candidates.sort();
        rejected.sort();
        Ok((candidates, rejected))
    }

    async fn load_key(&self, path: &Path) -> Result<Identity> {
        let content = read_input_file(path, "service account key")?;
        let key = ServiceAccountKey::parse(&content)?;
        let credential = self.oauth.exchange_service_account_key(&key).await?;
        Ok(Identity::seed(key.client_email, credential))
    }
}

#[async_trait]
impl CredentialSource for KeyFileSource {
    fn describe(&self) -> String {
        format!("key files in {}", self.key_dir.display())
    }

    async fn load_identities(&self) -> Vec<Identity> {
        let (candidates, mut malformed) = match Self::partition_key_files(&self.key_dir) {
            Ok(partitioned) => partitioned,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read key directory");
                return Vec::new();
            }
        };

        let mut identities = Vec::new();
        for path in candidates {
            match self.load_key(&path).await {
                Ok(identity) => {
                    tracing::info!(identity = identity.label(), "Loaded service account key");
                    identities.push(identity);
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Key file rejected");
                    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                        malformed.push(name.to_string());
                    }
                }
            }
        }

        for key_file in &malformed {
            tracing::error!(key_file = key_file.as_str(), "Failed to parse keyfile");
        }
        identities
    }
}
