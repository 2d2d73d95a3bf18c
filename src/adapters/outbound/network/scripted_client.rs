//! Scripted ServiceClient for adapter unit tests

use crate::ports::outbound::{CrawlError, ServiceClient};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned responses keyed by path and page token
pub struct ScriptedClient {
    pub pages: HashMap<(String, Option<String>), Result<Value, CrawlError>>,
    pub posts: HashMap<String, Result<Value, CrawlError>>,
    pub requests: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            posts: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn page(mut self, path: &str, token: Option<&str>, response: Value) -> Self {
        self.pages.insert(
            (path.to_string(), token.map(str::to_string)),
            Ok(response),
        );
        self
    }

    pub fn failing(mut self, path: &str, error: CrawlError) -> Self {
        self.pages.insert((path.to_string(), None), Err(error));
        self
    }

    pub fn post(mut self, path: &str, response: Result<Value, CrawlError>) -> Self {
        self.posts.insert(path.to_string(), response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServiceClient for ScriptedClient {
    fn service_family(&self) -> &str {
        "scripted"
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, CrawlError> {
        let token = query
            .iter()
            .find(|(key, _)| *key == "pageToken")
            .map(|(_, value)| value.to_string());
        let rendered: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        self.requests
            .lock()
            .unwrap()
            .push(format!("GET {} [{}]", path, rendered.join("&")));
        self.pages
            .get(&(path.to_string(), token))
            .cloned()
            .unwrap_or_else(|| Err(CrawlError::unavailable(format!("no page for {}", path))))
    }

    async fn post_json(&self, path: &str, _body: &Value) -> Result<Value, CrawlError> {
        self.requests.lock().unwrap().push(format!("POST {}", path));
        self.posts
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(CrawlError::unavailable(format!("no post for {}", path))))
    }
}
