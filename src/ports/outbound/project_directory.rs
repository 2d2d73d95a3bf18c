use crate::scanning::domain::{Credential, Project};
use crate::shared::Result;
use async_trait::async_trait;

/// ProjectDirectory port for discovering projects
///
/// This port abstracts Resource Manager: which projects a credential can see
/// and the metadata of a specific project.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Lists every project the credential can access
    ///
    /// # Errors
    /// Returns an error if the listing call itself fails
    async fn list_projects(&self, credential: &Credential) -> Result<Vec<Project>>;

    /// Fetches the metadata of one project
    ///
    /// # Returns
    /// None if the project is not visible to the credential
    async fn get_project(&self, credential: &Credential, project_id: &str)
        -> Result<Option<Project>>;
}
