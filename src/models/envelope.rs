//! The `{code, data, message}` wrapper every API response carries.

use bytes::Bytes;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Envelope `code` meaning success.
pub const SUCCESS_CODE: i64 = 200;

/// Response envelope.
///
/// List endpoints also put a `pagination` block next to `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Envelope whose payload is not inspected.
pub type Ack = Envelope<IgnoredAny>;

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Turn a non-200 envelope into an error, keeping the envelope otherwise.
    pub fn into_result(self, status: u16) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Application {
                status,
                code: self.code,
                message: self.message.unwrap_or_default(),
            })
        }
    }

    /// The payload, or [`ApiError::MissingData`] when the envelope has none.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }

    /// The payload together with its pagination block.
    pub fn into_page(self) -> Result<Page<T>, ApiError> {
        let pagination = self.pagination;
        Ok(Page {
            items: self.data.ok_or(ApiError::MissingData)?,
            pagination,
        })
    }
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
}

/// A page of list results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: T,
    pub pagination: Option<Pagination>,
}

/// Raw bytes returned by an export endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    /// File name from `Content-Disposition`, when the server sent one.
    pub file_name: Option<String>,
}

impl Download {
    /// Parse the file name out of a `Content-Disposition` header value.
    ///
    /// Handles `filename="a b.csv"`, bare `filename=a.csv` and the RFC 5987
    /// `filename*=UTF-8''...` form, which wins when both are present.
    pub fn file_name_from_disposition(value: &str) -> Option<String> {
        let mut plain = None;
        for part in value.split(';').map(str::trim) {
            if let Some(encoded) = part.strip_prefix("filename*=") {
                let encoded = encoded
                    .split_once("''")
                    .map(|(_, rest)| rest)
                    .unwrap_or(encoded);
                if let Ok(decoded) = urlencoding::decode(encoded.trim_matches('"')) {
                    return Some(decoded.into_owned());
                }
            } else if let Some(name) = part.strip_prefix("filename=") {
                plain = Some(name.trim_matches('"').to_string());
            }
        }
        plain.filter(|n| !n.is_empty())
    }
}
