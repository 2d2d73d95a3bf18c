mod gke_images;
mod iam_policy;
mod kms;
mod project_info;
mod registry;
mod rest_list_crawler;
mod storage_buckets;

pub use gke_images::GkeImagesCrawler;
pub use iam_policy::IamPolicyCrawler;
pub use kms::KmsCrawler;
pub use project_info::ProjectInfoCrawler;
pub use registry::StaticCrawlerRegistry;
pub use rest_list_crawler::{ListStyle, RestListCrawler};
pub use storage_buckets::{StorageBucketsCrawler, FETCH_FILE_NAMES};
