use crate::application::dto::{ScanRequest, ScanSummary};
use crate::ports::outbound::{
    ClientFactory, CrawlerRegistry, ImpersonationOutcome, Impersonator, ProgressReporter,
    ProjectDirectory, ResultStore,
};
use crate::scanning::domain::{
    CrawlRecord, CrawlerConfig, Identity, OutputName, Project, ProjectRecord,
};
use crate::scanning::policies::{SchemaRegistry, IAM_POLICY};
use crate::scanning::services::{EscalationDiscovery, FidelityFilter, TraversalSession};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Resource type whose crawler writes the companion object listing
const STORAGE_BUCKETS: &str = "storage_buckets";

/// CrawlIdentitiesUseCase - breadth-first traversal of the identity graph
///
/// Starting from the seed identities, every reachable project is crawled and
/// persisted, and service accounts found in IAM policies are impersonated and
/// queued when the scan configuration allows it.
///
/// # Type Parameters
/// * `CR` - CrawlerRegistry implementation
/// * `CF` - ClientFactory implementation
/// * `PD` - ProjectDirectory implementation
/// * `IMP` - Impersonator implementation
/// * `RS` - ResultStore implementation
/// * `PR` - ProgressReporter implementation
pub struct CrawlIdentitiesUseCase<CR, CF, PD, IMP, RS, PR> {
    crawler_registry: CR,
    client_factory: CF,
    project_directory: PD,
    impersonator: IMP,
    result_store: RS,
    progress_reporter: PR,
}

impl<CR, CF, PD, IMP, RS, PR> CrawlIdentitiesUseCase<CR, CF, PD, IMP, RS, PR>
where
    CR: CrawlerRegistry,
    CF: ClientFactory,
    PD: ProjectDirectory,
    IMP: Impersonator,
    RS: ResultStore,
    PR: ProgressReporter,
{
    /// Creates a new CrawlIdentitiesUseCase with injected dependencies
    pub fn new(
        crawler_registry: CR,
        client_factory: CF,
        project_directory: PD,
        impersonator: IMP,
        result_store: RS,
        progress_reporter: PR,
    ) -> Self {
        Self {
            crawler_registry,
            client_factory,
            project_directory,
            impersonator,
            result_store,
            progress_reporter,
        }
    }

    /// Runs the traversal until no unvisited identity is left
    ///
    /// Per-item failures are logged and never abort the run.
    pub async fn execute(&self, request: &ScanRequest, seeds: Vec<Identity>) -> ScanSummary {
        let mut session = TraversalSession::new(seeds);
        let mut summary = ScanSummary::default();

        while let Some(identity) = session.next_unvisited() {
            tracing::info!(
                identity = identity.label(),
                pending = session.pending_count(),
                ">> current service account"
            );
            self.crawl_identity(&identity, request, &mut session, &mut summary)
                .await;
        }
        summary.identities_processed = session.visited_count();

        self.progress_reporter
            .report_completion(&format!("✅ Scan finished: {}", summary));
        summary
    }

    async fn crawl_identity(
        &self,
        identity: &Identity,
        request: &ScanRequest,
        session: &mut TraversalSession,
        summary: &mut ScanSummary,
    ) {
        let projects = self.projects_for(identity, request).await;
        let mut record = CrawlRecord::for_identity(identity);

        for project in projects
            .into_iter()
            .filter(|project| project.matches_target(request.target_project.as_deref()))
        {
            self.crawl_project(identity, project, request, &mut record, session, summary)
                .await;
        }
    }

    /// Projects the identity can list, followed by forced projects not already listed
    async fn projects_for(&self, identity: &Identity, request: &ScanRequest) -> Vec<Project> {
        let mut projects = match self
            .project_directory
            .list_projects(identity.credential())
            .await
        {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!(identity = identity.label(), error = %e, "Failed to list projects");
                Vec::new()
            }
        };
        if projects.is_empty() {
            tracing::info!(
                identity = identity.label(),
                "Unable to list projects accessible from service account"
            );
        }

        for forced in &request.force_projects {
            if projects.iter().any(|project| &project.project_id == forced) {
                continue;
            }
            let project = match self
                .project_directory
                .get_project(identity.credential(), forced)
                .await
            {
                Ok(Some(project)) => project,
                Ok(None) => Project::placeholder(forced.as_str()),
                Err(e) => {
                    tracing::warn!(
                        identity = identity.label(),
                        project = forced.as_str(),
                        error = %e,
                        "Failed to fetch forced project metadata"
                    );
                    Project::placeholder(forced.as_str())
                }
            };
            projects.push(project);
        }
        projects
    }

    async fn crawl_project(
        &self,
        identity: &Identity,
        project: Project,
        request: &ScanRequest,
        record: &mut CrawlRecord,
        session: &mut TraversalSession,
        summary: &mut ScanSummary,
    ) {
        let project_id = project.project_id.clone();
        self.progress_reporter
            .report(&format!("🔍 Inspecting project {}", project_id));

        let output_name = OutputName::new(&project_id, &request.scan_time_suffix);
        let output_path = match self.result_store.reserve(output_name.file_name()) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(
                    identity = identity.label(),
                    project = project_id.as_str(),
                    "{}",
                    e
                );
                summary.projects_skipped += 1;
                // Escalation still runs from a project that is already written
                if request.scan_config.impersonation_enabled() {
                    let unsaved = ProjectRecord::default();
                    self.escalate(identity, &project_id, request, &unsaved, session, summary)
                        .await;
                }
                return;
            }
        };
        let gcs_output_path = self.result_store.path_for(&output_name.gcs_file_name());

        let project_record = record.project_mut(&project_id);
        project_record.set_project_info(project.metadata);
        self.crawl_resources(identity, &project_id, request, gcs_output_path, project_record)
            .await;

        if request.scan_config.impersonation_enabled() {
            let grants = self
                .escalate(identity, &project_id, request, project_record, session, summary)
                .await;
            for label in grants {
                project_record.add_edge(label);
            }
        }

        let Some(mut project_record) = record.take_project(&project_id) else {
            return;
        };
        if request.light_scan {
            FidelityFilter::apply_to_project(&mut project_record);
        }
        self.save(identity, record, &project_id, &project_record, &output_path, summary);
    }

    async fn crawl_resources(
        &self,
        identity: &Identity,
        project_id: &str,
        request: &ScanRequest,
        gcs_output_path: PathBuf,
        project_record: &mut ProjectRecord,
    ) {
        let resource_types = request.scan_config.enabled_resource_types();
        let total = resource_types.len();

        for (index, resource_type) in resource_types.into_iter().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(resource_type));
            let gcs_path = (resource_type == STORAGE_BUCKETS).then(|| gcs_output_path.clone());
            let config = request.scan_config.crawler_config(resource_type, gcs_path);
            let entries = self
                .crawl_resource(identity, project_id, resource_type, &config)
                .await;
            project_record.record_resource(resource_type, entries);
        }
        self.progress_reporter.report_progress(total, total, None);
    }

    /// Runs one crawler; any failure yields an empty list
    async fn crawl_resource(
        &self,
        identity: &Identity,
        project_id: &str,
        resource_type: &str,
        config: &CrawlerConfig,
    ) -> Vec<Value> {
        let Some(service_family) = SchemaRegistry::service_family_for(resource_type) else {
            tracing::error!(resource_type, "No service family for resource type");
            return Vec::new();
        };

        let crawler = match self.crawler_registry.crawler_for(resource_type) {
            Ok(crawler) => crawler,
            Err(e) => {
                tracing::error!(resource_type, error = %e, "No crawler registered");
                return Vec::new();
            }
        };
        let client = match self
            .client_factory
            .client_for(service_family, identity.credential())
        {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(resource_type, service_family, error = %e, "Failed to build client");
                return Vec::new();
            }
        };

        match crawler.crawl(project_id, client.as_ref(), config).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    identity = identity.label(),
                    project = project_id,
                    resource_type,
                    error = %e,
                    "Failed to crawl resource type"
                );
                Vec::new()
            }
        }
    }

    /// Impersonates the service accounts bound in the project's IAM policy
    ///
    /// Returns the labels that were granted, in candidate order.
    async fn escalate(
        &self,
        identity: &Identity,
        project_id: &str,
        request: &ScanRequest,
        project_record: &ProjectRecord,
        session: &mut TraversalSession,
        summary: &mut ScanSummary,
    ) -> Vec<String> {
        let fetched;
        let bindings: &[Value] = match project_record.resource(IAM_POLICY) {
            Some(bindings) => bindings,
            None => {
                let config = request.scan_config.crawler_config(IAM_POLICY, None);
                fetched = self
                    .crawl_resource(identity, project_id, IAM_POLICY, &config)
                    .await;
                &fetched
            }
        };

        let mut granted = Vec::new();
        for candidate in EscalationDiscovery::derive_impersonation_candidates(Some(bindings)) {
            if session.is_visited(&candidate) {
                continue;
            }
            tracing::info!(
                identity = identity.label(),
                candidate = candidate.as_str(),
                "Trying impersonation"
            );
            match self
                .impersonator
                .impersonate(identity.credential(), &candidate)
                .await
            {
                ImpersonationOutcome::Granted(credential) => {
                    tracing::info!(
                        identity = identity.label(),
                        candidate = candidate.as_str(),
                        "Successfully impersonated"
                    );
                    summary.impersonations_granted += 1;
                    session.enqueue(identity.escalate_to(candidate.as_str(), credential));
                    granted.push(candidate);
                }
                ImpersonationOutcome::Denied(reason) => {
                    tracing::error!(
                        identity = identity.label(),
                        candidate = candidate.as_str(),
                        reason = reason.as_str(),
                        "Failed to get token"
                    );
                    summary.impersonations_denied += 1;
                }
            }
        }
        granted
    }

    fn save(
        &self,
        identity: &Identity,
        record: &CrawlRecord,
        project_id: &str,
        project_record: &ProjectRecord,
        output_path: &Path,
        summary: &mut ScanSummary,
    ) {
        tracing::info!(project = project_id, "Saving results into the file");
        let result = record
            .project_document(project_id, project_record)
            .and_then(|document| self.result_store.persist(output_path, &document));
        match result {
            Ok(()) => summary.projects_written += 1,
            Err(e) => {
                tracing::error!(
                    identity = identity.label(),
                    project = project_id,
                    error = %e,
                    "Failed to save results"
                );
                summary.projects_skipped += 1;
            }
        }
    }
}
