use crate::scanning::domain::Identity;
use crate::scanning::policies::PROJECT_INFO;
use crate::shared::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Crawl results for a single project
///
/// Serializes as `project_info`, then one key per crawled resource type in
/// crawl order, then `service_account_edges`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectRecord {
    project_info: Value,
    #[serde(flatten)]
    resources: IndexMap<String, Vec<Value>>,
    service_account_edges: Vec<String>,
}

impl ProjectRecord {
    pub fn set_project_info(&mut self, project_info: Value) {
        self.project_info = project_info;
    }

    pub fn project_info(&self) -> &Value {
        &self.project_info
    }

    /// Stores the entries crawled for a resource type
    ///
    /// The `project_info` crawler refreshes the project metadata instead of
    /// adding a list; an empty result keeps the metadata already stored.
    pub fn record_resource(&mut self, resource_type: &str, entries: Vec<Value>) {
        if resource_type == PROJECT_INFO {
            if let Some(project_info) = entries.into_iter().next() {
                self.project_info = project_info;
            }
            return;
        }
        self.resources.insert(resource_type.to_string(), entries);
    }

    /// Entries stored for a resource type, if it was crawled
    pub fn resource(&self, resource_type: &str) -> Option<&[Value]> {
        self.resources.get(resource_type).map(Vec::as_slice)
    }

    pub fn resources(&self) -> &IndexMap<String, Vec<Value>> {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut IndexMap<String, Vec<Value>> {
        &mut self.resources
    }

    pub fn add_edge(&mut self, label: impl Into<String>) {
        self.service_account_edges.push(label.into());
    }

    pub fn service_account_edges(&self) -> &[String] {
        &self.service_account_edges
    }
}

/// Everything discovered while processing one identity
///
/// Built fresh per identity and never merged with another identity's record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlRecord {
    service_account_chain: Vec<String>,
    current_service_account: String,
    token_scopes: Vec<String>,
    projects: IndexMap<String, ProjectRecord>,
}

/// The JSON document persisted for one project
#[derive(Serialize)]
struct ProjectDocument<'a> {
    service_account_chain: &'a [String],
    current_service_account: &'a str,
    token_scopes: &'a [String],
    projects: IndexMap<&'a str, &'a ProjectRecord>,
}

impl CrawlRecord {
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            service_account_chain: identity.escalation_chain().to_vec(),
            current_service_account: identity.label().to_string(),
            token_scopes: identity.credential().scopes().to_vec(),
            projects: IndexMap::new(),
        }
    }

    /// Get-or-create the record of a project
    pub fn project_mut(&mut self, project_id: &str) -> &mut ProjectRecord {
        self.projects.entry(project_id.to_string()).or_default()
    }

    pub fn project(&self, project_id: &str) -> Option<&ProjectRecord> {
        self.projects.get(project_id)
    }

    /// Removes a project's data from the record, releasing its memory
    pub fn take_project(&mut self, project_id: &str) -> Option<ProjectRecord> {
        self.projects.shift_remove(project_id)
    }

    pub fn projects(&self) -> &IndexMap<String, ProjectRecord> {
        &self.projects
    }

    pub fn current_service_account(&self) -> &str {
        &self.current_service_account
    }

    pub fn service_account_chain(&self) -> &[String] {
        &self.service_account_chain
    }

    /// Builds the output document for a single project under this identity's header
    pub fn project_document(&self, project_id: &str, project: &ProjectRecord) -> Result<Value> {
        let mut projects = IndexMap::new();
        projects.insert(project_id, project);
        let document = ProjectDocument {
            service_account_chain: &self.service_account_chain,
            current_service_account: &self.current_service_account,
            token_scopes: &self.token_scopes,
            projects,
        };
        Ok(serde_json::to_value(document)?)
    }
}
