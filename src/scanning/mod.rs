/// Scanning core - domain model, static policies and pure services
///
/// Nothing in this module performs I/O; everything that talks to GCP or the
/// filesystem lives behind the ports in `crate::ports`.
pub mod domain;
pub mod policies;
pub mod services;
