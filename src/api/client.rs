//! HTTP adapter that speaks the backend's envelope protocol.
//!
//! Every call goes through [`ApiClient`]: it joins the base URL with the
//! path, attaches the bearer token, sends exactly one request and decodes the
//! `{code, data, message}` envelope. It never retries or refreshes tokens.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::query;
use crate::error::{ApiError, NetworkError};
use crate::models::{Ack, Download, Envelope};
use crate::state::SessionToken;
use crate::traits::{Headers, HttpClient, HttpError, MultipartFile, Response};

/// Longest non-JSON error body echoed back as a message.
const MAX_ERROR_BODY: usize = 200;

/// Shared client for every resource API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    token: SessionToken,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_set())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>, token: SessionToken) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Absolute URL of an API path such as `/hosts/3`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(bearer) = self.token.bearer() {
            headers.insert("Authorization".to_string(), bearer);
        }
        headers
    }

    fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|e| ApiError::Encode {
            message: e.to_string(),
        })
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let url = self.url(path);
        let headers = self.headers();
        debug!(method, path, "api request");

        let result = match method {
            "GET" => self.http.get(&url, &headers).await,
            "POST" => self.http.post(&url, body.as_deref().unwrap_or("{}"), &headers).await,
            "PUT" => self.http.put(&url, body.as_deref().unwrap_or("{}"), &headers).await,
            "DELETE" => self.http.delete(&url, &headers).await,
            other => Err(HttpError::Other(format!("unsupported method {}", other))),
        };

        result.map_err(|err| transport_error(err, &url))
    }

    /// `GET path` and decode the envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let response = self.send("GET", path, None).await?;
        decode(method_path("GET", path), response)
    }

    /// `GET path?query` where `query` is a filter struct.
    pub async fn get_with_query<T, Q>(&self, path: &str, params: &Q) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let path = query::with_query(path, params)?;
        self.get(&path).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Self::encode_body(body)?;
        let response = self.send("POST", path, Some(body)).await?;
        decode(method_path("POST", path), response)
    }

    /// `POST` with an empty JSON object body, for action endpoints.
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let response = self.send("POST", path, None).await?;
        decode(method_path("POST", path), response)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Self::encode_body(body)?;
        let response = self.send("PUT", path, Some(body)).await?;
        decode(method_path("PUT", path), response)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let response = self.send("DELETE", path, None).await?;
        decode(method_path("DELETE", path), response)
    }

    /// Send and only check the envelope code.
    pub async fn delete_ack(&self, path: &str) -> Result<Ack, ApiError> {
        self.delete(path).await
    }

    /// `GET` a binary export.
    pub async fn get_bytes(&self, path: &str) -> Result<Download, ApiError> {
        let response = self.send("GET", path, None).await?;
        download(response)
    }

    /// `POST` a JSON body and receive a binary export.
    pub async fn post_bytes<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Download, ApiError> {
        let body = Self::encode_body(body)?;
        let response = self.send("POST", path, Some(body)).await?;
        download(response)
    }

    /// Upload one file as `multipart/form-data`.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file: MultipartFile,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.url(path);
        debug!(method = "POST", path, file = %file.file_name, "api upload");
        let response = self
            .http
            .post_multipart(&url, file, &self.headers())
            .await
            .map_err(|err| transport_error(err, &url))?;
        decode(method_path("POST", path), response)
    }
}

fn method_path(method: &'static str, path: &str) -> (&'static str, String) {
    (method, path.split('?').next().unwrap_or(path).to_string())
}

fn transport_error(err: HttpError, url: &str) -> ApiError {
    debug!(error = %err, "api transport failure");
    ApiError::Transport(NetworkError::from_http(err, url))
}

/// Decode a response into an envelope of `T`.
///
/// The envelope `code` decides success; the HTTP status only matters when
/// the body is not an envelope at all.
fn decode<T: DeserializeOwned>(
    (method, path): (&'static str, String),
    response: Response,
) -> Result<Envelope<T>, ApiError> {
    let status = response.status;
    let ack: Ack = match serde_json::from_slice(&response.body) {
        Ok(ack) => ack,
        Err(err) if response.is_success() => {
            return Err(ApiError::Decode {
                message: err.to_string(),
            })
        }
        Err(_) => return Err(status_error(&response)),
    };

    if let Err(err) = ack.into_result(status) {
        debug!(method, path = %path, status, code = ?err.code(), "api call rejected");
        return Err(err);
    }

    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

fn download(response: Response) -> Result<Download, ApiError> {
    if !response.is_success() {
        return Err(match serde_json::from_slice::<Ack>(&response.body) {
            Ok(ack) => match ack.into_result(response.status) {
                Err(err) => err,
                Ok(_) => status_error(&response),
            },
            Err(_) => status_error(&response),
        });
    }

    let file_name = response
        .header("content-disposition")
        .and_then(Download::file_name_from_disposition);
    let content_type = response.header("content-type").map(str::to_string);
    Ok(Download {
        bytes: response.body,
        content_type,
        file_name,
    })
}

/// Error for a non-2xx response without an envelope.
///
/// Picks `message`, `msg` or `error` from a JSON body, else a short prefix
/// of the raw text.
fn status_error(response: &Response) -> ApiError {
    let message = serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(&response.body);
            text.trim().chars().take(MAX_ERROR_BODY).collect()
        });

    ApiError::Status {
        status: response.status,
        message,
    }
}
