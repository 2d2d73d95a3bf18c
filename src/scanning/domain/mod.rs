pub mod crawl_record;
pub mod identity;
pub mod output_name;
pub mod project;
pub mod scan_config;

pub use crawl_record::{CrawlRecord, ProjectRecord};
pub use identity::{Credential, Identity};
pub use output_name::OutputName;
pub use project::Project;
pub use scan_config::{CrawlerConfig, ResourceSettings, ScanConfig};
