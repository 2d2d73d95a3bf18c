use std::fmt;

/// Opaque credential handle: a bearer access token and the scopes it carries
///
/// The token itself never appears in `Debug` output, logs or scan results.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    scopes: Vec<String>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scopes,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// A credential-bearing principal that can be dequeued and explored
///
/// `label` is the dedup key for the whole traversal. `escalation_chain` lists
/// the identities traversed to reach this one, oldest first.
#[derive(Debug, Clone)]
pub struct Identity {
    label: String,
    credential: Credential,
    escalation_chain: Vec<String>,
}

impl Identity {
    /// Creates a seed identity with an empty escalation chain
    pub fn seed(label: impl Into<String>, credential: Credential) -> Self {
        Self {
            label: label.into(),
            credential,
            escalation_chain: Vec::new(),
        }
    }

    /// Creates the identity reached by impersonating `label` from `self`
    ///
    /// The new chain is this identity's chain followed by this identity's label.
    pub fn escalate_to(&self, label: impl Into<String>, credential: Credential) -> Self {
        let mut escalation_chain = self.escalation_chain.clone();
        escalation_chain.push(self.label.clone());
        Self {
            label: label.into(),
            credential,
            escalation_chain,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn escalation_chain(&self) -> &[String] {
        &self.escalation_chain
    }
}
