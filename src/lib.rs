//! gcp-scanner - GCP blast radius scanner
//!
//! Starting from a set of credentials, this library lists every project an
//! identity can reach, crawls the resources in those projects, and follows
//! service account impersonation edges found in IAM policies, writing one
//! JSON document per identity and project.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): Traversal state, records and schema tables
//! - **Application Layer** (`application`): The crawl use case and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): GCP REST, credential, filesystem and console implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use gcp_scanner::prelude::*;
//!
//! # async fn scan() -> Result<()> {
//! let http = build_http_client()?;
//! let use_case = CrawlIdentitiesUseCase::new(
//!     StaticCrawlerRegistry::with_default_crawlers(),
//!     RestClientFactory::new(http.clone()),
//!     ResourceManagerDirectory::new(RestClientFactory::new(http.clone())),
//!     IamCredentialsImpersonator::new(RestClientFactory::new(http.clone())),
//!     JsonFileStore::new("results"),
//!     StderrProgressReporter::new(),
//! );
//!
//! let seeds = MetadataServerSource::new(http).load_identities().await;
//! let request = ScanRequest::new(ScanConfig::fetch_everything(), "2026-10-14_10-00-00");
//! let summary = use_case.execute(&request, seeds).await;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::crawlers::StaticCrawlerRegistry;
    pub use crate::adapters::outbound::credentials::{
        AccessTokenFileSource, GcloudProfileSource, KeyFileSource, MetadataServerSource,
        RefreshTokenFileSource,
    };
    pub use crate::adapters::outbound::filesystem::JsonFileStore;
    pub use crate::adapters::outbound::network::{
        build_http_client, IamCredentialsImpersonator, ResourceManagerDirectory,
        RestClientFactory,
    };
    pub use crate::application::dto::{ScanRequest, ScanSummary};
    pub use crate::application::factories::{CredentialSelection, CredentialSourceFactory};
    pub use crate::application::use_cases::CrawlIdentitiesUseCase;
    pub use crate::ports::outbound::{
        ClientFactory, CrawlError, CrawlerRegistry, CredentialSource, ImpersonationOutcome,
        Impersonator, ProgressReporter, ProjectDirectory, ResourceCrawler, ResultStore,
        ServiceClient,
    };
    pub use crate::scanning::domain::{
        CrawlRecord, Credential, Identity, OutputName, Project, ProjectRecord, ScanConfig,
    };
    pub use crate::scanning::services::{EscalationDiscovery, FidelityFilter, TraversalSession};
    pub use crate::shared::Result;
}
