//! In-memory transport for unit tests.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::http_client::{FetchResponse, Transport};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub query: Vec<(String, String)>,
}

/// Answers every request with the same canned response and records it.
pub struct FakeTransport {
    response: Option<FetchResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            response: Some(FetchResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails as if the host were down.
    pub fn unreachable() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<FetchResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            endpoint: endpoint.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
        self.response
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))
    }
}
