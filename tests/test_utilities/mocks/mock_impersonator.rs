use async_trait::async_trait;
use gcp_scanner::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock Impersonator granting configured (base token, target) pairs
///
/// A granted target receives the token `token-<target>`.
#[derive(Clone, Default)]
pub struct MockImpersonator {
    grants: Arc<HashMap<String, Vec<String>>>,
    attempts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockImpersonator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, base_token: &str, target: &str) -> Self {
        Arc::make_mut(&mut self.grants)
            .entry(base_token.to_string())
            .or_default()
            .push(target.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<(String, String)> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn token_for(target: &str) -> String {
        format!("token-{}", target)
    }
}

#[async_trait]
impl Impersonator for MockImpersonator {
    async fn impersonate(&self, base: &Credential, target: &str) -> ImpersonationOutcome {
        self.attempts
            .lock()
            .unwrap()
            .push((base.access_token().to_string(), target.to_string()));
        let allowed = self
            .grants
            .get(base.access_token())
            .map(|targets| targets.iter().any(|t| t == target))
            .unwrap_or(false);
        if allowed {
            ImpersonationOutcome::Granted(Credential::new(Self::token_for(target), vec![]))
        } else {
            ImpersonationOutcome::Denied(format!(
                "Permission 'iam.serviceAccounts.getAccessToken' denied on {}",
                target
            ))
        }
    }
}
