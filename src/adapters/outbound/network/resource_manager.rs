use super::pagination::list_all;
use super::rest_client::CLOUD_RESOURCE_MANAGER;
use crate::ports::outbound::{ClientFactory, CrawlError, ProjectDirectory};
use crate::scanning::domain::{Credential, Project};
use crate::shared::Result;
use async_trait::async_trait;

/// ResourceManagerDirectory adapter - project discovery via Cloud Resource Manager v1
pub struct ResourceManagerDirectory<CF: ClientFactory> {
    client_factory: CF,
}

impl<CF: ClientFactory> ResourceManagerDirectory<CF> {
    pub fn new(client_factory: CF) -> Self {
        Self { client_factory }
    }
}

#[async_trait]
impl<CF: ClientFactory> ProjectDirectory for ResourceManagerDirectory<CF> {
    async fn list_projects(&self, credential: &Credential) -> Result<Vec<Project>> {
        let client = self
            .client_factory
            .client_for(CLOUD_RESOURCE_MANAGER, credential)?;
        let entries = list_all(client.as_ref(), "projects", &[], "projects").await?;

        let mut projects = Vec::with_capacity(entries.len());
        for entry in entries {
            match Project::from_metadata(entry) {
                Some(project) => projects.push(project),
                None => tracing::warn!("Skipping project entry without projectId"),
            }
        }
        Ok(projects)
    }

    async fn get_project(
        &self,
        credential: &Credential,
        project_id: &str,
    ) -> Result<Option<Project>> {
        let client = self
            .client_factory
            .client_for(CLOUD_RESOURCE_MANAGER, credential)?;
        let path = format!("projects/{}", urlencoding::encode(project_id));
        match client.get_json(&path, &[]).await {
            Ok(metadata) => Ok(Project::from_metadata(metadata)),
            Err(CrawlError::Unauthorized { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
