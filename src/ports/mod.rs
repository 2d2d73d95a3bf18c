/// Ports module defining interfaces for hexagonal architecture
///
/// The traversal core only talks to GCP, the filesystem and the console
/// through these driven ports.
pub mod outbound;
