use crate::adapters::outbound::network::{AuthorizedUser, OAuthTokenClient, ServiceAccountKey};
use crate::ports::outbound::CredentialSource;
use crate::scanning::domain::{Credential, Identity};
use crate::shared::error::ScanError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const LEGACY_CREDENTIALS_DIR: &str = "legacy_credentials";
const ADC_FILE: &str = "adc.json";

/// gcloud's SQLite credential stores, which this source does not read
const SQLITE_STORES: &[&str] = &["credentials.db", "access_tokens.db"];

/// An account cached by gcloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAccount {
    pub account_name: String,
    pub adc_path: PathBuf,
}

/// GcloudProfileSource adapter - accounts cached in a gcloud configuration directory
pub struct GcloudProfileSource {
    profile_dir: PathBuf,
    key_name: Option<String>,
    oauth: OAuthTokenClient,
}

impl GcloudProfileSource {
    pub fn new(
        profile_dir: impl Into<PathBuf>,
        key_name: Option<String>,
        oauth: OAuthTokenClient,
    ) -> Self {
        Self {
            profile_dir: profile_dir.into(),
            key_name,
            oauth,
        }
    }

    /// Lists cached accounts, optionally filtered by an account-name substring
    pub fn discover_accounts(
        profile_dir: &Path,
        key_name: Option<&str>,
    ) -> Result<Vec<CachedAccount>> {
        let legacy_dir = profile_dir.join(LEGACY_CREDENTIALS_DIR);
        let entries = fs::read_dir(&legacy_dir)
            .with_context(|| format!("Failed to list {}", legacy_dir.display()))?;

        let mut accounts = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let account_name = entry.file_name().to_string_lossy().to_string();
            if let Some(filter) = key_name {
                if !account_name.contains(filter) {
                    continue;
                }
            }
            let adc_path = entry.path().join(ADC_FILE);
            if adc_path.is_file() {
                accounts.push(CachedAccount {
                    account_name,
                    adc_path,
                });
            }
        }
        accounts.sort_by(|a, b| a.account_name.cmp(&b.account_name));
        Ok(accounts)
    }

    /// SQLite credential stores present in the profile directory
    pub fn unsupported_stores(profile_dir: &Path) -> Vec<&'static str> {
        SQLITE_STORES
            .iter()
            .copied()
            .filter(|store| profile_dir.join(store).is_file())
            .collect()
    }

    async fn credential_for(&self, account: &CachedAccount) -> Result<Credential> {
        let content = read_input_file(&account.adc_path, "gcloud credentials")?;
        let data: Value = serde_json::from_str(&content)?;
        match data.get("type").and_then(Value::as_str) {
            Some("authorized_user") => {
                let user: AuthorizedUser = serde_json::from_value(data)?;
                self.oauth.refresh(&user).await
            }
            Some("service_account") => {
                let key = ServiceAccountKey::parse(&content)?;
                self.oauth.exchange_service_account_key(&key).await
            }
            other => Err(ScanError::CredentialError {
                source_name: account.adc_path.display().to_string(),
                details: format!("unsupported credential type {:?}", other),
            }
            .into()),
        }
    }
}

#[async_trait]
impl CredentialSource for GcloudProfileSource {
    fn describe(&self) -> String {
        format!("gcloud profile {}", self.profile_dir.display())
    }

    async fn load_identities(&self) -> Vec<Identity> {
        for store in Self::unsupported_stores(&self.profile_dir) {
            tracing::warn!(
                store,
                "gcloud SQLite credential store is not read; only {}/<account>/{} is used",
                LEGACY_CREDENTIALS_DIR,
                ADC_FILE
            );
        }

        let accounts =
            match Self::discover_accounts(&self.profile_dir, self.key_name.as_deref()) {
                Ok(accounts) => accounts,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read gcloud profile");
                    return Vec::new();
                }
            };

        let mut identities = Vec::new();
        for account in accounts {
            tracing::info!(
                identity = account.account_name.as_str(),
                "Retrieving credentials"
            );
            match self.credential_for(&account).await {
                Ok(credential) => identities.push(Identity::seed(account.account_name, credential)),
                Err(e) => tracing::error!(
                    identity = account.account_name.as_str(),
                    error = %e,
                    "Failed to retrieve access token"
                ),
            }
        }
        identities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_account(profile: &Path, account: &str, adc: &str) {
        let dir = profile.join(LEGACY_CREDENTIALS_DIR).join(account);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ADC_FILE), adc).unwrap();
    }

    #[test]
    fn test_discover_accounts_sorted() {
        let temp_dir = TempDir::new().unwrap();
        cache_account(temp_dir.path(), "zed@example.com", "{}");
        cache_account(temp_dir.path(), "ann@example.com", "{}");
        fs::create_dir_all(
            temp_dir
                .path()
                .join(LEGACY_CREDENTIALS_DIR)
                .join("empty@example.com"),
        )
        .unwrap();

        let accounts = GcloudProfileSource::discover_accounts(temp_dir.path(), None).unwrap();
        let names: Vec<&str> = accounts.iter().map(|a| a.account_name.as_str()).collect();
        assert_eq!(names, vec!["ann@example.com", "zed@example.com"]);
    }

    #[test]
    fn test_discover_accounts_key_name_filter() {
        let temp_dir = TempDir::new().unwrap();
        cache_account(temp_dir.path(), "ann@example.com", "{}");
        cache_account(
            temp_dir.path(),
            "deployer@prod.iam.gserviceaccount.com",
            "{}",
        );

        let accounts =
            GcloudProfileSource::discover_accounts(temp_dir.path(), Some("deployer")).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(
            accounts[0].account_name,
            "deployer@prod.iam.gserviceaccount.com"
        );
    }

    #[test]
    fn test_sqlite_stores_are_detected() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GcloudProfileSource::unsupported_stores(temp_dir.path()).is_empty());

        fs::write(temp_dir.path().join("credentials.db"), b"SQLite format 3\0").unwrap();
        fs::write(temp_dir.path().join("access_tokens.db"), b"SQLite format 3\0").unwrap();
        assert_eq!(
            GcloudProfileSource::unsupported_stores(temp_dir.path()),
            vec!["credentials.db", "access_tokens.db"]
        );
    }

    #[tokio::test]
    async fn test_profile_with_only_sqlite_store_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("credentials.db"), b"SQLite format 3\0").unwrap();

        let source = GcloudProfileSource::new(
            temp_dir.path(),
            None,
            OAuthTokenClient::new(reqwest::Client::new()),
        );
        assert!(source.load_identities().await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_credential_type_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        cache_account(
            temp_dir.path(),
            "ann@example.com",
            r#"{"type": "external_account"}"#,
        );

        let source = GcloudProfileSource::new(
            temp_dir.path(),
            None,
            OAuthTokenClient::new(reqwest::Client::new()),
        );
        assert!(source.load_identities().await.is_empty());
    }
}
