use crate::adapters::outbound::credentials::{
    AccessTokenFileSource, GcloudProfileSource, KeyFileSource, MetadataServerSource,
    RefreshTokenFileSource,
};
use crate::adapters::outbound::network::OAuthTokenClient;
use crate::ports::outbound::CredentialSource;
use crate::scanning::domain::Identity;
use std::path::PathBuf;

/// Which credential sources a scan draws its seed identities from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSelection {
    pub key_dir: Option<PathBuf>,
    pub use_metadata: bool,
    pub gcloud_profile_dir: Option<PathBuf>,
    pub key_name: Option<String>,
    pub access_token_files: Vec<PathBuf>,
    pub refresh_token_files: Vec<PathBuf>,
}

impl CredentialSelection {
    /// Whether at least one source is selected
    ///
    /// # Examples
    /// ```
    /// use gcp_scanner::application::factories::CredentialSelection;
    ///
    /// let mut selection = CredentialSelection::default();
    /// assert!(selection.is_empty());
    /// selection.use_metadata = true;
    /// assert!(!selection.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.key_dir.is_none()
            && !self.use_metadata
            && self.gcloud_profile_dir.is_none()
            && self.access_token_files.is_empty()
            && self.refresh_token_files.is_empty()
    }
}

/// Factory for creating credential sources
///
/// Sources are created in a fixed order (key files, metadata, gcloud profile,
/// access tokens, refresh tokens), which is the order seeds enter the frontier.
pub struct CredentialSourceFactory;

impl CredentialSourceFactory {
    pub fn create(
        selection: &CredentialSelection,
        http: reqwest::Client,
    ) -> Vec<Box<dyn CredentialSource>> {
        let oauth = OAuthTokenClient::new(http.clone());
        let mut sources: Vec<Box<dyn CredentialSource>> = Vec::new();

        if let Some(key_dir) = &selection.key_dir {
            sources.push(Box::new(KeyFileSource::new(key_dir, oauth.clone())));
        }
        if selection.use_metadata {
            sources.push(Box::new(MetadataServerSource::new(http)));
        }
        if let Some(profile_dir) = &selection.gcloud_profile_dir {
            sources.push(Box::new(GcloudProfileSource::new(
                profile_dir,
                selection.key_name.clone(),
                oauth.clone(),
            )));
        }
        if !selection.access_token_files.is_empty() {
            sources.push(Box::new(AccessTokenFileSource::new(
                selection.access_token_files.clone(),
                oauth.clone(),
            )));
        }
        if !selection.refresh_token_files.is_empty() {
            sources.push(Box::new(RefreshTokenFileSource::new(
                selection.refresh_token_files.clone(),
                oauth,
            )));
        }
        sources
    }

    /// Loads the seed identities of every source, in source order
    pub async fn load_seeds(sources: &[Box<dyn CredentialSource>]) -> Vec<Identity> {
        let mut seeds = Vec::new();
        for source in sources {
            let identities = source.load_identities().await;
            tracing::info!(
                source = source.describe().as_str(),
                count = identities.len(),
                "Loaded seed identities"
            );
            seeds.extend(identities);
        }
        seeds
    }
}
