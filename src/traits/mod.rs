//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (GET, POST, PUT, DELETE, multipart upload)
//! - [`Storage`] - persisted key-value store for token and preferences

pub mod http;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, MultipartFile, Response};
pub use storage::{keys, Storage};
