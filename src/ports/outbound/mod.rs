/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (GCP APIs, file system, console).
pub mod credential_source;
pub mod impersonator;
pub mod progress_reporter;
pub mod project_directory;
pub mod resource_crawler;
pub mod result_store;
pub mod service_client;

pub use credential_source::CredentialSource;
pub use impersonator::{ImpersonationOutcome, Impersonator};
pub use progress_reporter::ProgressReporter;
pub use project_directory::ProjectDirectory;
pub use resource_crawler::{CrawlError, CrawlerRegistry, ResourceCrawler};
pub use result_store::ResultStore;
pub use service_client::{ClientFactory, ServiceClient};
