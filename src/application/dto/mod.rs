/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod scan_request;
mod scan_summary;

pub use scan_request::ScanRequest;
pub use scan_summary::ScanSummary;
