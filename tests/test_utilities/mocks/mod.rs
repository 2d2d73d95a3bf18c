/// Mock implementations for testing
mod mock_client_factory;
mod mock_impersonator;
mod mock_progress_reporter;
mod mock_project_directory;

pub use mock_client_factory::MockClientFactory;
pub use mock_impersonator::MockImpersonator;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_directory::MockProjectDirectory;
