use super::{
    GkeImagesCrawler, IamPolicyCrawler, KmsCrawler, ProjectInfoCrawler, RestListCrawler,
    StorageBucketsCrawler,
};
use crate::ports::outbound::{CrawlerRegistry, ResourceCrawler};
use crate::scanning::policies::{GKE_CLUSTERS, GKE_IMAGES, IAM_POLICY, PROJECT_INFO, SERVICE_ACCOUNTS};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::HashMap;
use std::sync::Arc;

const ENABLED_SERVICES: &[(&str, &str)] = &[("filter", "state:ENABLED")];
const PRODUCER_PROJECT: &[(&str, &str)] = &[("producerProjectId", "{project}")];

/// Descriptor table for collections listed directly under a project
const LIST_CRAWLERS: &[(&str, RestListCrawler)] = &[
    ("app_services", RestListCrawler::paged("apps/{project}/services", "services")),
    ("bigtable_instances", RestListCrawler::paged("projects/{project}/instances", "instances")),
    ("bq", RestListCrawler::paged("projects/{project}/datasets", "datasets")),
    (
        "cloud_functions",
        RestListCrawler::paged("projects/{project}/locations/-/functions", "functions"),
    ),
    ("compute_disks", RestListCrawler::aggregated("projects/{project}/aggregated/disks", "disks")),
    ("compute_images", RestListCrawler::paged("projects/{project}/global/images", "items")),
    (
        "compute_instances",
        RestListCrawler::aggregated("projects/{project}/aggregated/instances", "instances"),
    ),
    ("compute_snapshots", RestListCrawler::paged("projects/{project}/global/snapshots", "items")),
    ("dns_policies", RestListCrawler::paged("projects/{project}/policies", "policies")),
    ("endpoints", RestListCrawler::paged("services", "services").with_query(PRODUCER_PROJECT)),
    (
        "filestore_instances",
        RestListCrawler::paged("projects/{project}/locations/-/instances", "instances"),
    ),
    ("firewall_rules", RestListCrawler::paged("projects/{project}/global/firewalls", "items")),
    ("machine_images", RestListCrawler::paged("projects/{project}/global/machineImages", "items")),
    ("managed_zones", RestListCrawler::paged("projects/{project}/managedZones", "managedZones")),
    ("pubsub_subs", RestListCrawler::paged("projects/{project}/subscriptions", "subscriptions")),
    (
        "services",
        RestListCrawler::paged("projects/{project}/services", "services").with_query(ENABLED_SERVICES),
    ),
    (SERVICE_ACCOUNTS, RestListCrawler::paged("projects/{project}/serviceAccounts", "accounts")),
    ("sourcerepos", RestListCrawler::paged("projects/{project}/repos", "repos")),
    ("spanner_instances", RestListCrawler::paged("projects/{project}/instances", "instances")),
    ("sql_instances", RestListCrawler::paged("projects/{project}/instances", "items")),
    ("static_ips", RestListCrawler::aggregated("projects/{project}/aggregated/addresses", "addresses")),
    ("subnets", RestListCrawler::aggregated("projects/{project}/aggregated/subnetworks", "subnetworks")),
    (GKE_CLUSTERS, RestListCrawler::paged("projects/{project}/locations/-/clusters", "clusters")),
];

/// StaticCrawlerRegistry adapter - crawlers registered once at startup
pub struct StaticCrawlerRegistry {
    crawlers: HashMap<&'static str, Arc<dyn ResourceCrawler>>,
}

impl StaticCrawlerRegistry {
    /// Registry with a crawler for every known resource type
    pub fn with_default_crawlers() -> Self {
        let mut registry = Self {
            crawlers: HashMap::new(),
        };
        for (resource_type, crawler) in LIST_CRAWLERS {
            registry.register(*resource_type, Arc::new(*crawler));
        }
        registry.register(IAM_POLICY, Arc::new(IamPolicyCrawler));
        registry.register(PROJECT_INFO, Arc::new(ProjectInfoCrawler));
        registry.register("kms", Arc::new(KmsCrawler));
        registry.register("storage_buckets", Arc::new(StorageBucketsCrawler));
        registry.register(GKE_IMAGES, Arc::new(GkeImagesCrawler));
        registry
    }

    pub fn register(&mut self, resource_type: &'static str, crawler: Arc<dyn ResourceCrawler>) {
        self.crawlers.insert(resource_type, crawler);
    }
}

impl CrawlerRegistry for StaticCrawlerRegistry {
    fn crawler_for(&self, resource_type: &str) -> Result<Arc<dyn ResourceCrawler>> {
        self.crawlers.get(resource_type).cloned().ok_or_else(|| {
            ScanError::UnsupportedResourceType {
                resource_type: resource_type.to_string(),
            }
            .into()
        })
    }
}
