use crate::adapters::outbound::network::{AuthorizedUser, OAuthTokenClient};
use crate::ports::outbound::CredentialSource;
use crate::scanning::domain::{Credential, Identity};
use crate::shared::security::read_input_file;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Identity label of a token file: its file name
pub fn token_file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// AccessTokenFileSource adapter - files holding a raw bearer token
pub struct AccessTokenFileSource {
    files: Vec<PathBuf>,
    oauth: OAuthTokenClient,
}

impl AccessTokenFileSource {
    pub fn new(files: Vec<PathBuf>, oauth: OAuthTokenClient) -> Self {
        Self { files, oauth }
    }

    /// Reads the bearer token from a file, ignoring surrounding whitespace
    pub fn read_token(path: &Path) -> Result<String> {
        let token = read_input_file(path, "access token")?.trim().to_string();
        if token.is_empty() {
            anyhow::bail!("Access token file {} is empty", path.display());
        }
        Ok(token)
    }

    async fn load(&self, path: &Path) -> Result<Credential> {
        let token = Self::read_token(path)?;
        let scopes = match self.oauth.token_scopes(&token).await {
            Ok(scopes) => scopes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not resolve token scopes");
                Vec::new()
            }
        };
        Ok(Credential::new(token, scopes))
    }
}

#[async_trait]
impl CredentialSource for AccessTokenFileSource {
    fn describe(&self) -> String {
        format!("{} access token file(s)", self.files.len())
    }

    async fn load_identities(&self) -> Vec<Identity> {
        let mut identities = Vec::new();
        for path in &self.files {
            match self.load(path).await {
                Ok(credential) => identities.push(Identity::seed(token_file_label(path), credential)),
                Err(e) => tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to retrieve credentials using token provided"
                ),
            }
        }
        identities
    }
}

/// RefreshTokenFileSource adapter - JSON files with OAuth client credentials and a refresh token
pub struct RefreshTokenFileSource {
    files: Vec<PathBuf>,
    oauth: OAuthTokenClient,
}

impl RefreshTokenFileSource {
    pub fn new(files: Vec<PathBuf>, oauth: OAuthTokenClient) -> Self {
        Self { files, oauth }
    }

    pub fn read_authorized_user(path: &Path) -> Result<AuthorizedUser> {
        let content = read_input_file(path, "refresh token")?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn load(&self, path: &Path) -> Result<Credential> {
        let user = Self::read_authorized_user(path)?;
        self.oauth.refresh(&user).await
    }
}

#[async_trait]
impl CredentialSource for RefreshTokenFileSource {
    fn describe(&self) -> String {
        format!("{} refresh token file(s)", self.files.len())
    }

    async fn load_identities(&self) -> Vec<Identity> {
        let mut identities = Vec::new();
        for path in &self.files {
            match self.load(path).await {
                Ok(credential) => identities.push(Identity::seed(token_file_label(path), credential)),
                Err(e) => tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to retrieve credentials using token provided"
                ),
            }
        }
        identities
    }
}
