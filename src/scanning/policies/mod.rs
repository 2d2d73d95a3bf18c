pub mod schema_registry;

pub use schema_registry::{
    SchemaRegistry, CRAWL_CLIENT_MAP, GKE_CLUSTERS, GKE_IMAGES, IAM_POLICY, LIGHT_SCHEMA,
    MISC_CRAWL_CLIENT_MAP, PROJECT_INFO, SERVICE_ACCOUNTS,
};
