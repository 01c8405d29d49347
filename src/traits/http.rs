//! HTTP client trait abstraction.
//!
//! Resource modules never talk to reqwest directly. They go through
//! [`HttpClient`] so the transport can be swapped for a recording mock
//! in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
///
/// Non-2xx statuses are ordinary responses, not errors: the backend puts
/// a `{code, message}` envelope in the body of its 4xx/5xx answers and
/// callers need to read it.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers (names lowercased by the adapters)
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// A file sent as one part of a `multipart/form-data` upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartFile {
    /// Form field name
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the part
    pub content_type: String,
    /// Raw file contents
    pub bytes: Bytes,
}

impl MultipartFile {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Transport-level failures. A response with any status code is not an error here.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// IO error while reading the body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Implemented by [`crate::adapters::ReqwestHttpClient`] for production and
/// by [`crate::adapters::mock::MockHttpClient`] in tests.
///
/// # Example
///
/// ```ignore
/// use prophet::traits::{HttpClient, Headers, HttpError};
///
/// async fn ping<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.get("http://localhost:5000/api/auth/me", &Headers::new()).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request with a JSON body.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a PUT request with a JSON body.
    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a DELETE request.
    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a `multipart/form-data` POST carrying a single file part.
    async fn post_multipart(
        &self,
        url: &str,
        file: MultipartFile,
        headers: &Headers,
    ) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_headers() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = Response::with_headers(200, headers, Bytes::from("{}"));
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("content-disposition"), None);
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(201, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(300, Bytes::new()).is_success());
        assert!(!Response::new(401, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Body {
            code: i64,
        }

        let response = Response::new(200, Bytes::from(r#"{"code":200}"#));
        let body: Body = response.json().unwrap();
        assert_eq!(body, Body { code: 200 });
        assert_eq!(response.text().unwrap(), r#"{"code":200}"#);
    }

    #[test]
    fn test_multipart_file_new() {
        let file = MultipartFile::new("file", "hosts.csv", "text/csv", "ip\n10.0.0.1\n");
        assert_eq!(file.field, "file");
        assert_eq!(file.file_name, "hosts.csv");
        assert_eq!(file.bytes, Bytes::from("ip\n10.0.0.1\n"));
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::Timeout("10s".to_string()).to_string(),
            "Request timeout: 10s"
        );
        assert_eq!(
            HttpError::InvalidUrl("bad url".to_string()).to_string(),
            "Invalid URL: bad url"
        );
        assert_eq!(
            HttpError::Other("unknown".to_string()).to_string(),
            "HTTP error: unknown"
        );
    }
}
