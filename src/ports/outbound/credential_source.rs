use crate::scanning::domain::Identity;
use async_trait::async_trait;

/// CredentialSource port producing seed identities
///
/// Sources report per-item failures (a malformed key file, an unreadable
/// token) through the log and keep going; they never fail as a whole.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Short description used in log lines (e.g. "key files in ./keys")
    fn describe(&self) -> String;

    /// Loads every identity this source can produce, each with an empty chain
    async fn load_identities(&self) -> Vec<Identity>;
}
