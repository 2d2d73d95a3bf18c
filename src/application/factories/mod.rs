mod credential_source_factory;

pub use credential_source_factory::{CredentialSelection, CredentialSourceFactory};
