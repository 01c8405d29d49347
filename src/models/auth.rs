use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{deserialize_timestamp, Timestamp};

/// The signed-in user as returned by `/auth/me` and `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_login: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
}

/// Captcha challenge from `GET /auth/captcha`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Captcha {
    pub captcha_id: String,
    /// `data:image/png;base64,...` URL
    pub image: String,
}

impl Captcha {
    /// Decode the embedded image into raw PNG bytes.
    pub fn image_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let payload = match self.image.split_once(',') {
            Some((header, data)) if header.starts_with("data:") => data,
            _ => self.image.as_str(),
        };
        base64::engine::general_purpose::STANDARD.decode(payload.trim())
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub captcha_id: String,
    pub captcha_code: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub captcha_id: String,
    pub captcha_code: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}
