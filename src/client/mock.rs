/*!
 * In-memory transport for tests.
 *
 * Responses are canned per path:
 * - `respond(path, body)` queues a raw body
 * - `respond_ok(path, payload)` queues a success envelope
 * - `respond_error(path, code, msg)` queues an error envelope
 * - `respond_bytes(path, bytes)` sets the body for `get_bytes`
 *
 * Queued bodies are served in order; the last one keeps being served.
 * Every call is recorded and can be inspected with `calls()`.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};

use crate::client::{Transport, check_path};
use crate::errors::GengoError;
use crate::jobs::FileUpload;
use crate::protocol::QueryParams;

/// One call made against the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP method
    pub method: &'static str,
    /// Request path
    pub path: String,
    /// Query or form parameters, without auth parameters
    pub params: QueryParams,
    /// JSON payload of POST/PUT calls
    pub payload: Option<Value>,
    /// File keys of uploaded parts
    pub file_keys: Vec<String>,
    /// Whether the call asked for a signature
    pub authenticated: bool,
}

/// Mock transport with canned responses
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<String>>>,
    bytes: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response body for `path`
    pub fn respond(&self, path: impl Into<String>, body: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .entry(path.into())
            .or_default()
            .push_back(body.into());
        self
    }

    /// Queue a success envelope around `payload`
    pub fn respond_ok(&self, path: impl Into<String>, payload: Value) -> &Self {
        let body = json!({"opstat": "ok", "response": payload});
        self.respond(path, body.to_string())
    }

    /// Queue an error envelope
    pub fn respond_error(&self, path: impl Into<String>, code: &str, msg: &str) -> &Self {
        let body = json!({"opstat": "error", "err": {"code": code, "msg": msg}});
        self.respond(path, body.to_string())
    }

    /// Set the binary body for `path`
    pub fn respond_bytes(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &Self {
        self.bytes.lock().insert(path.into(), bytes.into());
        self
    }

    /// Every call so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: RecordedCall) -> Result<String, GengoError> {
        check_path(&call.path)?;
        let path = call.path.clone();
        self.calls.lock().push(call);

        let mut responses = self.responses.lock();
        let queue = responses
            .get_mut(&path)
            .filter(|queue| !queue.is_empty())
            .ok_or_else(|| GengoError::Transport(format!("No mock response for {}", path)))?;

        let body = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        body.ok_or_else(|| GengoError::Transport(format!("No mock response for {}", path)))
    }

    fn call(method: &'static str, path: &str) -> RecordedCall {
        RecordedCall {
            method,
            path: path.to_string(),
            params: QueryParams::new(),
            payload: None,
            file_keys: Vec::new(),
            authenticated: true,
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> Result<String, GengoError> {
        self.record(RecordedCall {
            params,
            authenticated,
            ..Self::call("GET", path)
        })
    }

    async fn post_form(&self, path: &str, fields: QueryParams) -> Result<String, GengoError> {
        self.record(RecordedCall {
            params: fields,
            ..Self::call("POST", path)
        })
    }

    async fn post_json(
        &self,
        path: &str,
        payload: Value,
        files: &[FileUpload],
    ) -> Result<String, GengoError> {
        self.record(RecordedCall {
            payload: Some(payload),
            file_keys: files.iter().map(|f| f.file_key().to_string()).collect(),
            ..Self::call("POST", path)
        })
    }

    async fn put(&self, path: &str, payload: Value) -> Result<String, GengoError> {
        self.record(RecordedCall {
            payload: Some(payload),
            ..Self::call("PUT", path)
        })
    }

    async fn delete(&self, path: &str) -> Result<String, GengoError> {
        self.record(Self::call("DELETE", path))
    }

    async fn get_bytes(&self, path: &str, authenticated: bool) -> Result<Vec<u8>, GengoError> {
        check_path(path)?;
        self.calls.lock().push(RecordedCall {
            authenticated,
            ..Self::call("GET", path)
        });

        self.bytes
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| GengoError::Transport(format!("No mock bytes for {}", path)))
    }
}
