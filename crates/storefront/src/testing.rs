//! Test doubles shared by the unit tests

use crate::client::StorefrontClient;
use crate::config::ClientConfig;
use crate::credential::StaticToken;
use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that records requests and replays scripted replies in order
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<ApiResult<ApiResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn respond_json(&self, body: &str) {
        self.respond(200, body);
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::transport(message)));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted reply")))
    }
}

/// Client over a [`RecordingTransport`], optionally signed in with `token`
pub fn recording_client(token: Option<&str>) -> (StorefrontClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let credentials = token.map(StaticToken::new).unwrap_or_default();
    let client = StorefrontClient::from_parts(
        ClientConfig::development(),
        transport.clone(),
        Arc::new(credentials),
    );
    (client, transport)
}
