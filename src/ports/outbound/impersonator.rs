use crate::scanning::domain::Credential;
use async_trait::async_trait;

/// Result of a single impersonation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpersonationOutcome {
    /// A delegated credential for the target was minted
    Granted(Credential),
    /// The attempt failed (permission denied, unknown account, quota, ...)
    Denied(String),
}

/// Impersonator port - mints delegated credentials for other service accounts
///
/// Implementations make exactly one attempt per call and report failure
/// through [`ImpersonationOutcome::Denied`] instead of an error.
#[async_trait]
pub trait Impersonator: Send + Sync {
    /// Attempts to impersonate `target` using the authority of `base`
    async fn impersonate(&self, base: &Credential, target: &str) -> ImpersonationOutcome;
}
