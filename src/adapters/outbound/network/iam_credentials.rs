use super::oauth_client::CLOUD_PLATFORM_SCOPE;
use super::rest_client::IAM_CREDENTIALS;
use crate::ports::outbound::{ClientFactory, ImpersonationOutcome, Impersonator};
use crate::scanning::domain::Credential;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Lifetime requested for minted impersonation tokens
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// IamCredentialsImpersonator adapter - `generateAccessToken` on the IAM Credentials API
pub struct IamCredentialsImpersonator<CF: ClientFactory> {
    client_factory: CF,
}

impl<CF: ClientFactory> IamCredentialsImpersonator<CF> {
    pub fn new(client_factory: CF) -> Self {
        Self { client_factory }
    }

    fn request_body() -> Value {
        json!({
            "scope": [CLOUD_PLATFORM_SCOPE],
            "lifetime": format!("{}s", DEFAULT_TOKEN_LIFETIME_SECS),
        })
    }
}

#[async_trait]
impl<CF: ClientFactory> Impersonator for IamCredentialsImpersonator<CF> {
    async fn impersonate(&self, base: &Credential, target: &str) -> ImpersonationOutcome {
        let client = match self.client_factory.client_for(IAM_CREDENTIALS, base) {
            Ok(client) => client,
            Err(e) => return ImpersonationOutcome::Denied(e.to_string()),
        };

        let path = format!(
            "projects/-/serviceAccounts/{}:generateAccessToken",
            urlencoding::encode(target)
        );
        match client.post_json(&path, &Self::request_body()).await {
            Ok(response) => match response.get("accessToken").and_then(Value::as_str) {
                Some(token) => ImpersonationOutcome::Granted(Credential::new(
                    token,
                    vec![CLOUD_PLATFORM_SCOPE.to_string()],
                )),
                None => ImpersonationOutcome::Denied(
                    "generateAccessToken response has no accessToken".to_string(),
                ),
            },
            Err(e) => ImpersonationOutcome::Denied(e.to_string()),
        }
    }
}
