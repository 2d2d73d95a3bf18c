use async_trait::async_trait;
use gcp_scanner::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Routes = HashMap<(String, String, String), Value>;

/// Mock ClientFactory serving canned JSON per (access token, family, path)
///
/// Unrouted requests fail with `CrawlError::Unauthorized`, like a GCP API
/// answering 403 for a resource the identity cannot read.
#[derive(Clone, Default)]
pub struct MockClientFactory {
    routes: Arc<Routes>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, token: &str, family: &str, path: &str, response: Value) -> Self {
        Arc::make_mut(&mut self.routes).insert(
            (token.to_string(), family.to_string(), path.to_string()),
            response,
        );
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ClientFactory for MockClientFactory {
    fn client_for(
        &self,
        service_family: &str,
        credential: &Credential,
    ) -> Result<Box<dyn ServiceClient>> {
        Ok(Box::new(MockServiceClient {
            token: credential.access_token().to_string(),
            service_family: service_family.to_string(),
            routes: self.routes.clone(),
            requests: self.requests.clone(),
        }))
    }
}

struct MockServiceClient {
    token: String,
    service_family: String,
    routes: Arc<Routes>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServiceClient {
    fn respond(&self, method: &str, path: &str) -> std::result::Result<Value, CrawlError> {
        self.requests.lock().unwrap().push(format!(
            "{} {} {}/{}",
            self.token, method, self.service_family, path
        ));
        self.routes
            .get(&(
                self.token.clone(),
                self.service_family.clone(),
                path.to_string(),
            ))
            .cloned()
            .ok_or_else(|| CrawlError::Unauthorized {
                status: 403,
                message: format!("{} cannot read {}", self.token, path),
            })
    }
}

#[async_trait]
impl ServiceClient for MockServiceClient {
    fn service_family(&self) -> &str {
        &self.service_family
    }

    async fn get_json(
        &self,
        path: &str,
        _query: &[(&str, &str)],
    ) -> std::result::Result<Value, CrawlError> {
        self.respond("GET", path)
    }

    async fn post_json(&self, path: &str, _body: &Value) -> std::result::Result<Value, CrawlError> {
        self.respond("POST", path)
    }
}
