//! Mock HTTP client for testing.
//!
//! Serves canned responses keyed by URL (optionally narrowed to one method)
//! and records every request so tests can assert on exactly what was sent.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{Headers, HttpClient, HttpError, MultipartFile, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: String,
    /// Request URL including any query string
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// JSON request body (POST and PUT)
    pub body: Option<String>,
    /// Uploaded file (multipart POST)
    pub file: Option<MultipartFile>,
}

impl RecordedRequest {
    /// URL without the query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    /// Query string without the leading `?`, empty when absent.
    pub fn query(&self) -> &str {
        self.url.split_once('?').map(|(_, q)| q).unwrap_or("")
    }

    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A response whose body is the given JSON value.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        MockResponse::Success(Response::with_headers(
            status,
            headers,
            Bytes::from(value.to_string()),
        ))
    }

    /// A `{code: 200, data}` envelope with HTTP status 200.
    pub fn ok(data: serde_json::Value) -> Self {
        Self::json(200, serde_json::json!({"code": 200, "data": data}))
    }

    /// A raw byte response, as returned by export endpoints.
    pub fn bytes(status: u16, content_type: &str, body: impl Into<Bytes>) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), content_type.to_string());
        MockResponse::Success(Response::with_headers(status, headers, body.into()))
    }
}

/// Mock HTTP client for testing.
///
/// Lookup order for a request: exact `METHOD url`, exact `url`, the longest
/// matching prefix (method-specific first), then the default response.
///
/// # Example
///
/// ```ignore
/// use prophet::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_method_response("GET", "http://prophet.test/api/tags", MockResponse::ok(json!([])));
///
/// let response = client.get("http://prophet.test/api/tags", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by `url` or `METHOD url`
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL, regardless of method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a response for one method on a URL.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        lock(&self.responses).insert(format!("{} {}", method.to_uppercase(), url), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of recorded requests with the given method and path (query ignored).
    pub fn count(&self, method: &str, path: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method == method && r.path() == path)
            .count()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        lock(&self.responses).clear();
    }

    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        file: Option<MultipartFile>,
    ) {
        lock(&self.requests).push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            file,
        });
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        let responses = lock(&self.responses);
        let keyed = format!("{} {}", method, url);

        if let Some(response) = responses.get(&keyed).or_else(|| responses.get(url)) {
            return Some(response.clone());
        }

        let method_prefix = format!("{} ", method);
        let best = responses
            .iter()
            .filter_map(|(pattern, response)| {
                let (specific, bare) = match pattern.strip_prefix(&method_prefix) {
                    Some(rest) => (true, rest),
                    None if pattern.contains(' ') => return None,
                    None => (false, pattern.as_str()),
                };
                url.starts_with(bare)
                    .then_some(((bare.len(), specific), response))
            })
            .max_by_key(|(rank, _)| *rank)
            .map(|(_, response)| response.clone());
        if best.is_some() {
            return best;
        }

        lock(&self.default_response).clone()
    }

    fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, None);
        self.respond("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.respond("POST", url)
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("PUT", url, headers, Some(body.to_string()), None);
        self.respond("PUT", url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None, None);
        self.respond("DELETE", url)
    }

    async fn post_multipart(
        &self,
        url: &str,
        file: MultipartFile,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, None, Some(file));
        self.respond("POST", url)
    }
}
