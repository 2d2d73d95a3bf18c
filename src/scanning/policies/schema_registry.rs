/// Resource type holding the project's IAM policy bindings
pub const IAM_POLICY: &str = "iam_policy";

/// Resource type refreshing the project metadata
pub const PROJECT_INFO: &str = "project_info";

/// Resource type listing the project's service accounts (also carries the `impersonate` switch)
pub const SERVICE_ACCOUNTS: &str = "service_accounts";

/// Miscellaneous crawler listing GKE clusters
pub const GKE_CLUSTERS: &str = "gke_clusters";

/// Miscellaneous crawler listing container images in GCR
pub const GKE_IMAGES: &str = "gke_images";

/// Resource type → service family used to crawl it
///
/// Crawl order follows this table. A wrong family here makes a crawler talk
/// to the wrong API surface, so entries are checked verbatim by tests.
pub const CRAWL_CLIENT_MAP: &[(&str, &str)] = &[
    ("app_services", "appengine"),
    ("bigtable_instances", "bigtableadmin"),
    ("bq", "bigquery"),
    ("cloud_functions", "cloudfunctions"),
    ("compute_disks", "compute"),
    ("compute_images", "compute"),
    ("compute_instances", "compute"),
    ("compute_snapshots", "compute"),
    ("dns_policies", "dns"),
    ("endpoints", "servicemanagement"),
    ("filestore_instances", "file"),
    ("firewall_rules", "compute"),
    (IAM_POLICY, "cloudresourcemanager"),
    ("kms", "cloudkms"),
    ("machine_images", "compute"),
    ("managed_zones", "dns"),
    (PROJECT_INFO, "cloudresourcemanager"),
    ("pubsub_subs", "pubsub"),
    ("services", "serviceusage"),
    (SERVICE_ACCOUNTS, "iam"),
    ("sourcerepos", "sourcerepo"),
    ("spanner_instances", "spanner"),
    ("sql_instances", "sqladmin"),
    ("static_ips", "compute"),
    ("storage_buckets", "storage"),
    ("subnets", "compute"),
];

/// Crawlers run after the main table, outside of it
pub const MISC_CRAWL_CLIENT_MAP: &[(&str, &str)] = &[
    (GKE_CLUSTERS, "container"),
    (GKE_IMAGES, "containerregistry"),
];

/// Fields kept per resource type in light scans
pub const LIGHT_SCHEMA: &[(&str, &[&str])] = &[
    (
        "compute_instances",
        &["name", "zone", "machineType", "networkInterfaces", "status"],
    ),
    (
        "compute_images",
        &["name", "status", "diskSizeGb", "sourceDisk"],
    ),
    (
        "machine_images",
        &[
            "name",
            "description",
            "status",
            "sourceInstance",
            "totalStorageBytes",
            "savedDisks",
        ],
    ),
    (
        "compute_disks",
        &["name", "sizeGb", "zone", "status", "sourceImage", "users"],
    ),
    (
        "compute_snapshots",
        &["name", "status", "sourceDisk", "downloadBytes"],
    ),
    (
        "managed_zones",
        &["name", "dnsName", "description", "nameServers"],
    ),
    (
        "sql_instances",
        &["name", "region", "ipAddresses", "databaseVersion", "state"],
    ),
    (
        "cloud_functions",
        &[
            "name",
            "eventTrigger",
            "status",
            "entryPoint",
            "serviceAccountEmail",
        ],
    ),
    ("kms", &["name", "primary", "purpose", "createTime"]),
    ("services", &["name"]),
];

/// Static lookups over the resource-type tables
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Service family required to crawl a resource type (main or miscellaneous)
    pub fn service_family_for(resource_type: &str) -> Option<&'static str> {
        CRAWL_CLIENT_MAP
            .iter()
            .chain(MISC_CRAWL_CLIENT_MAP)
            .find(|(name, _)| *name == resource_type)
            .map(|(_, family)| *family)
    }

    /// Field list kept for a resource type in light scans
    pub fn reduced_fields(resource_type: &str) -> Option<&'static [&'static str]> {
        LIGHT_SCHEMA
            .iter()
            .find(|(name, _)| *name == resource_type)
            .map(|(_, fields)| *fields)
    }

    /// Every crawlable resource type in crawl order, miscellaneous crawlers last
    pub fn crawl_order() -> impl Iterator<Item = &'static str> {
        CRAWL_CLIENT_MAP
            .iter()
            .chain(MISC_CRAWL_CLIENT_MAP)
            .map(|(name, _)| *name)
    }

    pub fn is_known_resource_type(resource_type: &str) -> bool {
        Self::service_family_for(resource_type).is_some()
    }
}
