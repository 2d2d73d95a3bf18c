use crate::scanning::domain::ScanConfig;

/// ScanRequest - Internal request DTO for the identity crawl use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Which resource types to crawl and whether to impersonate
    pub scan_config: ScanConfig,
    /// Reduce resource entries to the light schema before saving
    pub light_scan: bool,
    /// Only projects whose id contains this substring are crawled
    pub target_project: Option<String>,
    /// Projects crawled even when the identity cannot list them
    pub force_projects: Vec<String>,
    /// Scan start time, formatted for output file names
    pub scan_time_suffix: String,
}

impl ScanRequest {
    pub fn new(scan_config: ScanConfig, scan_time_suffix: impl Into<String>) -> Self {
        Self {
            scan_config,
            light_scan: false,
            target_project: None,
            force_projects: Vec::new(),
            scan_time_suffix: scan_time_suffix.into(),
        }
    }

    pub fn with_light_scan(mut self, light_scan: bool) -> Self {
        self.light_scan = light_scan;
        self
    }

    pub fn with_target_project(mut self, target_project: Option<String>) -> Self {
        self.target_project = target_project;
        self
    }

    pub fn with_force_projects(mut self, force_projects: Vec<String>) -> Self {
        self.force_projects = force_projects;
        self
    }
}
