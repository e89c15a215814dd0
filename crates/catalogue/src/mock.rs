//! In-memory transport for exercising the client without a service.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::error::CatalogueResult;
use crate::transport::{ApiResponse, Transport};

/// Canned responses keyed by endpoint. Unknown endpoints answer 404.
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, ApiResponse>,
    requests: Mutex<Vec<(String, String)>>,
    put_bodies: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, endpoint: &str, response: ApiResponse) -> Self {
        self.responses
            .insert(normalize(endpoint).to_string(), response);
        self
    }

    /// Answer `endpoint` with 200 and `body` serialized as JSON.
    pub fn with_json(self, endpoint: &str, body: serde_json::Value) -> Self {
        self.with_response(endpoint, ApiResponse::ok(body.to_string()))
    }

    /// `(method, endpoint)` for every request seen, in order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn put_bodies(&self) -> Vec<String> {
        self.put_bodies.lock().clone()
    }

    fn answer(&self, method: &str, endpoint: &str) -> ApiResponse {
        let endpoint = normalize(endpoint);
        self.requests
            .lock()
            .push((method.to_string(), endpoint.to_string()));
        self.responses
            .get(endpoint)
            .cloned()
            .unwrap_or_else(ApiResponse::not_found)
    }
}

fn normalize(endpoint: &str) -> &str {
    endpoint.trim_start_matches('/')
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, endpoint: &str) -> CatalogueResult<ApiResponse> {
        Ok(self.answer("GET", endpoint))
    }

    async fn put(&self, endpoint: &str, body: String) -> CatalogueResult<ApiResponse> {
        self.put_bodies.lock().push(body);
        Ok(self.answer("PUT", endpoint))
    }
}
