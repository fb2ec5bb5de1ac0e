//! In-memory transport for unit tests.

use crate::jenkins::client::{JenkinsTransport, RawResponse, RequestBody};
use crate::job_error::TransportError;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordedBody {
    Empty,
    Form(Vec<(String, String)>),
    Xml(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub endpoint: String,
    pub body: RecordedBody,
}

/// Answers from per-endpoint queues. The last queued answer of an endpoint
/// is repeated forever; an endpoint without answers gets a 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<HashMap<(String, String), VecDeque<RawResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, endpoint: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), endpoint.to_string()))
            .or_default()
            .push_back(RawResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, endpoint: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.endpoint == endpoint)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl JenkinsTransport for ScriptedTransport {
    async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: RequestBody<'_>,
    ) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            body: match body {
                RequestBody::Empty => RecordedBody::Empty,
                RequestBody::Form(pairs) => RecordedBody::Form(pairs.to_vec()),
                RequestBody::Xml(xml) => RecordedBody::Xml(xml.to_string()),
            },
        });

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), endpoint.to_string()));

        Ok(match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => RawResponse::new(404, "Not Found"),
        })
    }
}
