use serde_json::{json, Value};

/// Placeholder project number used when project metadata cannot be looked up
pub const UNKNOWN_PROJECT_NUMBER: &str = "N/A";

/// A GCP project reachable by an identity
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: String,
    pub project_number: String,
    /// Raw metadata as returned by Resource Manager
    pub metadata: Value,
}

impl Project {
    /// Builds a project from a Resource Manager project resource
    ///
    /// Returns None if the resource has no `projectId`.
    pub fn from_metadata(metadata: Value) -> Option<Self> {
        let project_id = metadata.get("projectId")?.as_str()?.to_string();
        let project_number = match metadata.get("projectNumber") {
            Some(Value::String(number)) => number.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => UNKNOWN_PROJECT_NUMBER.to_string(),
        };
        Some(Self {
            project_id,
            project_number,
            metadata,
        })
    }

    /// Placeholder for a forced project whose metadata lookup failed
    pub fn placeholder(project_id: impl Into<String>) -> Self {
        let project_id = project_id.into();
        Self {
            metadata: json!({
                "projectId": project_id,
                "projectNumber": UNKNOWN_PROJECT_NUMBER,
            }),
            project_id,
            project_number: UNKNOWN_PROJECT_NUMBER.to_string(),
        }
    }

    /// Whether this project passes the optional single-project filter
    ///
    /// The filter is a substring match on the project id.
    pub fn matches_target(&self, target_project: Option<&str>) -> bool {
        match target_project {
            Some(target) => self.project_id.contains(target),
            None => true,
        }
    }
}
