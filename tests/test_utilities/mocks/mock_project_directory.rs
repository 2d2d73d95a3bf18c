use async_trait::async_trait;
use gcp_scanner::prelude::*;
use serde_json::json;
use std::collections::HashMap;

/// Mock ProjectDirectory keyed by access token
#[derive(Default)]
pub struct MockProjectDirectory {
    listings: HashMap<String, Vec<Project>>,
}

impl MockProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, token: &str, project_ids: &[&str]) -> Self {
        let projects = project_ids
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                Project::from_metadata(json!({
                    "projectId": id,
                    "projectNumber": format!("{}", 1000 + index),
                    "lifecycleState": "ACTIVE",
                }))
            })
            .collect();
        self.listings.insert(token.to_string(), projects);
        self
    }
}

#[async_trait]
impl ProjectDirectory for MockProjectDirectory {
    async fn list_projects(&self, credential: &Credential) -> Result<Vec<Project>> {
        Ok(self
            .listings
            .get(credential.access_token())
            .cloned()
            .unwrap_or_default())
    }

    async fn get_project(
        &self,
        credential: &Credential,
        project_id: &str,
    ) -> Result<Option<Project>> {
        Ok(self
            .listings
            .get(credential.access_token())
            .and_then(|projects| projects.iter().find(|p| p.project_id == project_id))
            .cloned())
    }
}
