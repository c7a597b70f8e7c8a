//! Recording transport for controller tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{HttpRequest, HttpResponse, Transport};
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::state::auth::Session;

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.push(Ok(HttpResponse { status, body: body.to_string() }))
    }

    pub fn fail(self, err: ApiError) -> Self {
        self.push(Err(err))
    }

    fn push(self, response: Result<HttpResponse, ApiError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Wrap in an `ApiClient` pointed at `http://api.test`, keeping a handle
    /// for inspecting what was sent.
    pub fn into_client(self) -> (ApiClient, Arc<Self>) {
        let mock = Arc::new(self);
        let config = ClientConfig { api_base_url: "http://api.test".to_owned() };
        let client = ApiClient::with_transport(&config, Session::default(), mock.clone());
        (client, mock)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no mock response queued".to_owned())))
    }
}
